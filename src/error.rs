use crate::Locale;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status on the advisory endpoint.
    ///
    /// `detail` holds at most the first 100 characters of the body.
    #[error("HTTP error! Status: {status}. Detail: {detail}...")]
    Http { status: u16, detail: String },
    /// Every attempt of a retried request failed.
    #[error("API request failed after multiple retries: {message}")]
    RetriesExhausted {
        /// Number of attempts performed.
        attempts: usize,
        /// Message of the last underlying failure.
        message: String,
    },
    /// Advisory response carried no usable candidate text.
    #[error("advice blocked: {reason}")]
    Blocked { reason: String },
    /// Non-success HTTP status from the diagnosis server, with raw body.
    #[error("Server Error: {status}. Detail: {detail}")]
    Diagnosis { status: u16, detail: String },
    /// The diagnosis server could not be reached. Never retried.
    #[error("diagnosis server unreachable: {0}")]
    DiagnosisUnavailable(reqwest::Error),
    /// The diagnosis server answered with a body that could not be decoded.
    #[error("invalid diagnosis response: {0}")]
    DiagnosisDecode(String),
    /// Response decoding or shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
    /// Required form fields were left blank.
    #[error("missing required input: {}", .0.join(", "))]
    MissingInput(Vec<&'static str>),
    /// Another request from the same screen is still in flight.
    #[error("a request is already in progress")]
    Busy,
}

/// Short user-facing message: a title line and a detail line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserMessage {
    pub title: String,
    pub detail: String,
}

impl AdvisorError {
    /// Returns `true` for failures the retrying client may retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. })
    }

    /// Builds the message shown to the farmer in the given locale.
    pub fn user_message(&self, locale: Locale) -> UserMessage {
        let (title, detail) = match (locale, self) {
            (Locale::Arabic, Self::MissingInput(_)) => (
                "معلومات ناقصة",
                "يرجى ملء جميع الحقول المطلوبة (المحصول، الحجم، نوع التربة).".to_owned(),
            ),
            (Locale::English, Self::MissingInput(fields)) => (
                "Missing information",
                format!("Please fill in all required fields ({}).", fields.join(", ")),
            ),
            (Locale::Arabic, Self::Blocked { reason }) => (
                "حظر المستشار",
                format!("تعذر استرداد النصيحة. السبب: {reason}."),
            ),
            (Locale::English, Self::Blocked { reason }) => (
                "Advisor blocked",
                format!("Could not retrieve advice. Reason: {reason}."),
            ),
            (
                Locale::Arabic,
                Self::Diagnosis { .. } | Self::DiagnosisUnavailable(_) | Self::DiagnosisDecode(_),
            ) => (
                "خطأ في التشخيص",
                format!("فشل الاتصال بالخادم. التفاصيل: {self}"),
            ),
            (
                Locale::English,
                Self::Diagnosis { .. } | Self::DiagnosisUnavailable(_) | Self::DiagnosisDecode(_),
            ) => (
                "Diagnosis error",
                format!("Diagnosis failed. Details: {self}"),
            ),
            (Locale::Arabic, Self::Busy) => ("يرجى الانتظار", "الطلب السابق قيد التنفيذ.".to_owned()),
            (Locale::English, Self::Busy) => (
                "Please wait",
                "The previous request is still running.".to_owned(),
            ),
            (Locale::Arabic, _) => (
                "خطأ في الاتصال",
                format!("فشل الاتصال. التفاصيل: {self}"),
            ),
            (Locale::English, _) => ("Connection error", format!("Request failed. Details: {self}")),
        };

        UserMessage {
            title: title.to_owned(),
            detail,
        }
    }
}
