//! The closed set of listing categories.
//!
//! Every category shares the same core fields; what varies is a small set of
//! extra string tags. A category is a discriminator plus the tag fields it
//! requires or accepts.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Jobs,
    Pets,
    Fashions,
    Services,
    Bikes,
    Phones,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Jobs,
        Category::Pets,
        Category::Fashions,
        Category::Services,
        Category::Bikes,
        Category::Phones,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Jobs => "jobs",
            Category::Pets => "pets",
            Category::Fashions => "fashions",
            Category::Services => "services",
            Category::Bikes => "bikes",
            Category::Phones => "phones",
        }
    }

    /// Extra fields that must be present and non-empty at create time.
    pub fn required_extra_fields(self) -> &'static [&'static str] {
        match self {
            Category::Jobs => &["hinhThucTraLuong", "loaiCongViec", "nganhNghe"],
            _ => &[],
        }
    }

    /// Extra fields accepted but not required.
    pub fn optional_extra_fields(self) -> &'static [&'static str] {
        match self {
            Category::Pets => &["loaiPet", "color"],
            _ => &[],
        }
    }

    /// Check the category's required extra fields and keep only the fields
    /// the category declares, the way a schema-backed store drops
    /// undeclared keys. Returns the persistable tag map or the list of
    /// missing fields.
    pub fn validate_extras(
        self,
        extra: &BTreeMap<String, String>,
    ) -> Result<serde_json::Value, Vec<FieldError>> {
        let mut errors = Vec::new();
        for field in self.required_extra_fields() {
            match extra.get(*field) {
                Some(value) if !value.trim().is_empty() => {}
                _ => errors.push(FieldError::required(field)),
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut kept = serde_json::Map::new();
        for field in self
            .required_extra_fields()
            .iter()
            .chain(self.optional_extra_fields())
        {
            if let Some(value) = extra.get(*field) {
                kept.insert(
                    (*field).to_string(),
                    serde_json::Value::String(value.clone()),
                );
            }
        }
        Ok(serde_json::Value::Object(kept))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jobs" => Ok(Category::Jobs),
            "pets" => Ok(Category::Pets),
            "fashions" => Ok(Category::Fashions),
            "services" => Ok(Category::Services),
            "bikes" => Ok(Category::Bikes),
            "phones" => Ok(Category::Phones),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extras(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().as_ref(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!("boats".parse::<Category>().is_err());
        assert!("Jobs".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_jobs_requires_all_tags() {
        let err = Category::Jobs
            .validate_extras(&extras(&[("hinhThucTraLuong", "monthly")]))
            .unwrap_err();
        let params: Vec<&str> = err.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, vec!["loaiCongViec", "nganhNghe"]);
    }

    #[test]
    fn test_blank_tag_counts_as_missing() {
        let err = Category::Jobs
            .validate_extras(&extras(&[
                ("hinhThucTraLuong", "   "),
                ("loaiCongViec", "full-time"),
                ("nganhNghe", "logistics"),
            ]))
            .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err[0].param, "hinhThucTraLuong");
        assert_eq!(err[0].msg, "hinhThucTraLuong is required");
    }

    #[test]
    fn test_undeclared_tags_are_dropped() {
        let kept = Category::Pets
            .validate_extras(&extras(&[("loaiPet", "dog"), ("breed", "corgi")]))
            .unwrap();
        assert_eq!(kept, serde_json::json!({ "loaiPet": "dog" }));
    }

    #[test]
    fn test_categories_without_extras_accept_empty_map() {
        for category in [Category::Fashions, Category::Services, Category::Bikes] {
            let kept = category.validate_extras(&BTreeMap::new()).unwrap();
            assert_eq!(kept, serde_json::json!({}));
        }
    }
}
