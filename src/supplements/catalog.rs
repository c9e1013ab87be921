//! Supplements the recognition endpoint can report, and their known contents

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::HealthError;

/// Nutrient name to quantity, e.g. `"Magnesium" -> "350mg"`
pub type NutrientMap = BTreeMap<String, String>;

macro_rules! supplements {
    ($($variant:ident => $name:literal, $label:literal;)+) => {
        /// A recognizable supplement product class
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Supplement {
            $($variant,)+
        }

        impl Supplement {
            /// Every class, in recognition-model index order
            pub const ALL: &'static [Supplement] = &[$(Supplement::$variant,)+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Supplement::$variant => $name,)+
                }
            }

            /// Label emitted by the recognition endpoint
            pub fn label_ko(&self) -> &'static str {
                match self {
                    $(Supplement::$variant => $label,)+
                }
            }
        }
    };
}

supplements! {
    Glucosamine => "Glucosamine", "글루코사민";
    Lutein => "Lutein", "루테인";
    Magnesium => "Magnesium", "마그네슘";
    Manganese => "Manganese", "망간";
    VitaminA1 => "Vitamin A1", "비타민A1";
    VitaminA2 => "Vitamin A2", "비타민A2";
    VitaminB1 => "Vitamin B1 (thiamine)", "비타민B1(티아민)";
    VitaminB12 => "Vitamin B12 (cobalamin)", "비타민B12(코발라민)";
    VitaminB2 => "Vitamin B2 (riboflavin)", "비타민B2(리보플라빈)";
    VitaminB3 => "Vitamin B3 (niacin)", "비타민B3(니아신)";
    VitaminB5 => "Vitamin B5 (pantothenic acid)", "비타민B5(판토텐산)";
    VitaminB6 => "Vitamin B6 (pyridoxine)", "비타민B6(피리독신)";
    VitaminB9 => "Vitamin B9 (folate)", "비타민B9(엽산)";
    VitaminC => "Vitamin C", "비타민C";
    VitaminD => "Vitamin D", "비타민D";
    VitaminE => "Vitamin E", "비타민E";
    VitaminK1 => "Vitamin K1", "비타민K1";
    VitaminK2 => "Vitamin K2", "비타민K2";
    Selenium => "Selenium", "셀레늄";
    Zinc => "Zinc", "아연";
    Iodine => "Iodine", "아이오딘";
    Omega3 => "Omega-3", "오메가3";
    Probiotics => "Probiotics", "유산균";
    Iron => "Iron", "철분";
    Potassium => "Potassium", "칼륨";
    Calcium => "Calcium", "칼슘";
    CoenzymeQ10 => "Coenzyme Q10", "코엔자임Q10";
    Collagen => "Collagen", "콜라겐";
    Chromium => "Chromium", "크롬";
    RedGinseng => "Red ginseng", "홍삼";
}

impl Supplement {
    /// Known contents of a typical product, or an "unknown" placeholder
    pub fn nutrients(&self) -> NutrientMap {
        let known: &[(&str, &str)] = match self {
            Supplement::Magnesium => &[("Magnesium", "350mg"), ("Vitamin B6", "20mg")],
            Supplement::VitaminC => &[("Vitamin C", "1000mg")],
            Supplement::VitaminB6 => &[("Vitamin B6", "50mg")],
            Supplement::Omega3 => &[("EPA", "300mg"), ("DHA", "200mg")],
            Supplement::RedGinseng => &[("Ginsenosides", "10mg")],
            Supplement::Iron => &[("Iron", "15mg")],
            Supplement::Lutein => &[("Lutein", "20mg")],
            _ => &[("unknown", "unknown")],
        };

        known
            .iter()
            .map(|(nutrient, amount)| (nutrient.to_string(), amount.to_string()))
            .collect()
    }

    pub fn has_known_nutrients(&self) -> bool {
        !self.nutrients().contains_key("unknown")
    }
}

/// Squash case, spacing and punctuation so "vitamin-b6" matches "Vitamin B6 (pyridoxine)"
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Supplement {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if let Some(found) = Supplement::ALL
            .iter()
            .find(|sup| sup.label_ko() == needle || sup.name() == needle)
        {
            return Ok(*found);
        }

        // Accept the short form of a name ("Vitamin B6" for "Vitamin B6 (pyridoxine)")
        let wanted = normalize(needle);
        Supplement::ALL
            .iter()
            .find(|sup| {
                let short = sup.name().split(" (").next().unwrap_or_default();
                normalize(sup.name()) == wanted || normalize(short) == wanted
            })
            .copied()
            .ok_or_else(|| HealthError::UnknownSupplement(s.to_string()))
    }
}

impl TryFrom<String> for Supplement {
    type Error = HealthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Supplement> for String {
    fn from(supplement: Supplement) -> Self {
        supplement.label_ko().to_string()
    }
}

impl fmt::Display for Supplement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_classes() {
        assert_eq!(Supplement::ALL.len(), 30);
        assert_eq!(Supplement::ALL[0], Supplement::Glucosamine);
        assert_eq!(Supplement::ALL[29], Supplement::RedGinseng);
    }

    #[test]
    fn test_parse_endpoint_labels() {
        assert_eq!("홍삼".parse::<Supplement>().unwrap(), Supplement::RedGinseng);
        assert_eq!(
            "비타민B3(니아신)".parse::<Supplement>().unwrap(),
            Supplement::VitaminB3
        );
    }

    #[test]
    fn test_parse_english_names() {
        assert_eq!("omega-3".parse::<Supplement>().unwrap(), Supplement::Omega3);
        assert_eq!("Vitamin B6".parse::<Supplement>().unwrap(), Supplement::VitaminB6);
        assert_eq!("coenzyme q10".parse::<Supplement>().unwrap(), Supplement::CoenzymeQ10);
        assert!("Unobtainium".parse::<Supplement>().is_err());
    }

    #[test]
    fn test_nutrients() {
        let magnesium = Supplement::Magnesium.nutrients();
        assert_eq!(magnesium.get("Magnesium").map(String::as_str), Some("350mg"));
        assert_eq!(magnesium.len(), 2);

        assert!(!Supplement::Zinc.has_known_nutrients());
        assert!(Supplement::Iron.has_known_nutrients());
    }
}
