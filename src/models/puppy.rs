use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::care::age;

/// Profile of the puppy. Every field is optional; an unset profile is `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PuppyInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<NaiveDate>,
}

impl PuppyInfo {
    pub fn age_weeks_on(&self, day: NaiveDate) -> Option<u32> {
        self.birth_date.map(|birth| age::age_in_weeks(birth, day))
    }
}
