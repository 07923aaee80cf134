use crate::{
    wire::{Content, GenerateContentRequest, GoogleSearch, Part, Tool},
    AdvisorError, FarmProfile,
};

pub(crate) const SYSTEM_PROMPT: &str = "أنت مستشار زراعي ذكي ومتخصص ومصمم خصيصاً للمزارعين أصحاب الحيازات الصغيرة في مصر. قدم نصيحة موجزة وقابلة للتنفيذ وسليمة علمياً للبارامترات المعطاة، مع التركيز على طرق حفظ المياه ذات الصلة بالمناخ والتربة المصرية. استجب بشكل أساسي باللغة العربية الواضحة والاحترافية.";

impl FarmProfile {
    /// Checks that every field holds something other than whitespace.
    pub fn validate(&self) -> Result<(), AdvisorError> {
        let missing: Vec<&'static str> = [
            ("crop", &self.crop),
            ("land_size", &self.land_size),
            ("soil_type", &self.soil_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AdvisorError::MissingInput(missing))
        }
    }

    pub(crate) fn user_query(&self) -> String {
        format!(
            "قدم نصيحة زراعية مفصلة بناءً على المعطيات التالية:\nالمحصول: {}\nحجم الأرض: {}\nنوع التربة: {}",
            self.crop.trim(),
            self.land_size.trim(),
            self.soil_type.trim()
        )
    }
}

fn text_content(text: String) -> Content {
    Content {
        parts: vec![Part { text: Some(text) }],
    }
}

pub(crate) fn build_advice_request(
    profile: &FarmProfile,
) -> Result<GenerateContentRequest, AdvisorError> {
    profile.validate()?;
    Ok(GenerateContentRequest {
        contents: vec![text_content(profile.user_query())],
        tools: vec![Tool {
            google_search: GoogleSearch {},
        }],
        system_instruction: text_content(SYSTEM_PROMPT.to_owned()),
    })
}
