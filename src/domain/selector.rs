use serde::{Deserialize, Serialize};

/// Filter expression attached to API requests.
///
/// Impression Share reports only accept `countryOrRegion` and `adamId`
/// conditions with the `IN` operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<Sorting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<SelectorPagination>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: ConditionOperator,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionOperator {
    Equals,
    In,
    LessThan,
    GreaterThan,
    #[serde(rename = "STARTSWITH")]
    StartsWith,
    Contains,
    Between,
    ContainsAll,
    ContainsAny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sorting {
    pub field: String,
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPagination {
    pub offset: u32,
    pub limit: u32,
}

impl Selector {
    pub fn countries_or_regions<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_condition("countryOrRegion", ConditionOperator::In, codes)
    }

    pub fn adam_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self::default().with_condition(
            "adamId",
            ConditionOperator::In,
            ids.into_iter().map(|id| id.to_string()),
        )
    }

    pub fn with_condition<I, S>(mut self, field: &str, operator: ConditionOperator, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.push(Condition {
            field: field.to_string(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.order_by.is_none() && self.pagination.is_none()
    }
}
