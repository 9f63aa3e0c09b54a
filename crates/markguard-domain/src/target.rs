//! Target trademark - the application every record is compared against

/// A proposed trademark application
///
/// Field names mirror [`Field`](crate::Field) so prompts can present the
/// target and the existing record side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetTrademark {
    /// Trademark name as filed
    pub name: &'static str,
    /// Application number
    pub application_number: &'static str,
    /// Goods and services description
    pub goods_and_services: &'static str,
    /// Owner
    pub owner: &'static str,
    /// Applicant
    pub applicant: &'static str,
    /// Register mark
    pub register_mark: &'static str,
    /// Nice class
    pub class: &'static str,
    /// Application date
    pub application_date: &'static str,
    /// Status
    pub status: &'static str,
    /// Publication date
    pub publication_date: &'static str,
}

/// The fixed target application assessed in every run
pub const SHIELD_TARGET: TargetTrademark = TargetTrademark {
    name: "SHIELD",
    application_number: "983489723",
    goods_and_services: "Software security over cloud based applications",
    owner: "AWS",
    applicant: "AWS",
    register_mark: "SHIELD",
    class: "9",
    application_date: "11-11-2024",
    status: "Under creation",
    publication_date: "12-12-2024",
};
