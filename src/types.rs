use std::fmt;
use std::str::FromStr;

/// Language of user-facing text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    Arabic,
    English,
}

/// A web source the advisory service grounded its answer on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Citation {
    pub uri: String,
    pub title: String,
}

/// Generated advice with up to three citations, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advice {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// Result of a leaf image diagnosis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnosis {
    pub disease: Option<String>,
    pub treatment: Option<String>,
}

impl Diagnosis {
    /// Renders the two-section report shown under the diagnosis screen.
    pub fn render(&self, locale: Locale) -> String {
        let (disease_label, treatment_label, unknown, no_treatment) = match locale {
            Locale::Arabic => ("المرض", "العلاج المقترح", "غير معروف", "لا يوجد علاج مقترح."),
            Locale::English => (
                "Disease",
                "Suggested treatment",
                "unknown",
                "no treatment suggested",
            ),
        };
        let disease = non_blank(self.disease.as_deref()).unwrap_or(unknown);
        let treatment = non_blank(self.treatment.as_deref()).unwrap_or(no_treatment);

        format!("**{disease_label}:** {disease}\n\n**{treatment_label}:**\n{treatment}")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Advisory form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FarmProfile {
    pub crop: String,
    pub land_size: String,
    pub soil_type: String,
}

impl FarmProfile {
    pub fn new(
        crop: impl Into<String>,
        land_size: impl Into<String>,
        soil_type: impl Into<String>,
    ) -> Self {
        Self {
            crop: crop.into(),
            land_size: land_size.into(),
            soil_type: soil_type.into(),
        }
    }
}

/// Crops the diagnosis server has a model for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CropType {
    #[default]
    Potato,
    Mango,
    Wheat,
}

impl CropType {
    pub const ALL: [CropType; 3] = [CropType::Potato, CropType::Mango, CropType::Wheat];

    /// Identifier sent as `crop_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Potato => "potato",
            Self::Mango => "mango",
            Self::Wheat => "wheat",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Arabic, Self::Potato) => "البطاطس",
            (Locale::Arabic, Self::Mango) => "المانجو",
            (Locale::Arabic, Self::Wheat) => "القمح",
            (Locale::English, Self::Potato) => "Potato",
            (Locale::English, Self::Mango) => "Mango",
            (Locale::English, Self::Wheat) => "Wheat",
        }
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropType {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|crop| crop.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| format!("unsupported crop type '{normalized}'"))
    }
}

#[cfg(test)]
mod tests {
    use crate::{CropType, Diagnosis, Locale};

    #[test]
    fn diagnosis_render_includes_both_sections() {
        let diagnosis = Diagnosis {
            disease: Some("Late Blight".to_owned()),
            treatment: Some("Apply fungicide".to_owned()),
        };
        let text = diagnosis.render(Locale::English);
        assert_eq!(
            text,
            "**Disease:** Late Blight\n\n**Suggested treatment:**\nApply fungicide"
        );
        let arabic = diagnosis.render(Locale::Arabic);
        assert!(arabic.contains("Late Blight"));
        assert!(arabic.contains("Apply fungicide"));
    }

    #[test]
    fn diagnosis_render_uses_fallbacks() {
        let diagnosis = Diagnosis {
            disease: None,
            treatment: Some("  ".to_owned()),
        };
        let text = diagnosis.render(Locale::English);
        assert!(text.contains("unknown"));
        assert!(text.contains("no treatment suggested"));
        assert!(diagnosis.render(Locale::Arabic).contains("غير معروف"));
    }

    #[test]
    fn crop_type_parses_wire_names() {
        assert_eq!("Mango".parse::<CropType>(), Ok(CropType::Mango));
        assert_eq!(" wheat ".parse::<CropType>(), Ok(CropType::Wheat));
        assert!("rice".parse::<CropType>().is_err());
        assert_eq!(CropType::Potato.to_string(), "potato");
        assert_eq!(CropType::Potato.label(Locale::Arabic), "البطاطس");
    }
}
