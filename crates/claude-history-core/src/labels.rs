//! Localized label packs used in transcript headers and tool framing

use std::str::FromStr;

use crate::errors::ExportError;

/// Fixed set of labels for one output language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPack {
    pub user: &'static str,
    pub assistant: &'static str,
    pub tool: &'static str,
    pub result: &'static str,
    pub param: &'static str,
    /// Marker appended to truncated tool results
    pub truncated: &'static str,
}

impl LabelPack {
    /// Header label for a role; anything other than `user` is the assistant
    pub fn role_label(&self, role: &str) -> &'static str {
        if role == "user" {
            self.user
        } else {
            self.assistant
        }
    }
}

impl Default for LabelPack {
    fn default() -> Self {
        Language::default().labels()
    }
}

/// Supported output languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Zh,
    En,
    Es,
    Fr,
    De,
    Ja,
    Ko,
    Ru,
    Pt,
    It,
}

impl Language {
    /// All languages in display order
    pub fn all() -> &'static [Language] {
        &[
            Language::Zh,
            Language::En,
            Language::Es,
            Language::Fr,
            Language::De,
            Language::Ja,
            Language::Ko,
            Language::Ru,
            Language::Pt,
            Language::It,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Ru => "ru",
            Language::Pt => "pt",
            Language::It => "it",
        }
    }

    /// Native display name
    pub fn name(&self) -> &'static str {
        match self {
            Language::Zh => "中文",
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::De => "Deutsch",
            Language::Ja => "日本語",
            Language::Ko => "한국어",
            Language::Ru => "Русский",
            Language::Pt => "Português",
            Language::It => "Italiano",
        }
    }

    /// Look up a language by code, falling back to the default pack
    pub fn from_code(code: &str) -> Language {
        code.parse().unwrap_or_default()
    }

    pub fn labels(&self) -> LabelPack {
        match self {
            Language::Zh => LabelPack {
                user: "👤 用户",
                assistant: "🤖 助手",
                tool: "🔧",
                result: "✅ 结果:",
                param: "参数:",
                truncated: "... (内容过长，已截断)",
            },
            Language::En => LabelPack {
                user: "👤 User",
                assistant: "🤖 Assistant",
                tool: "🔧",
                result: "✅ Result:",
                param: "Args:",
                truncated: "... (content too long, truncated)",
            },
            Language::Es => LabelPack {
                user: "👤 Usuario",
                assistant: "🤖 Asistente",
                tool: "🔧",
                result: "✅ Resultado:",
                param: "Parámetros:",
                truncated: "... (contenido demasiado largo, truncado)",
            },
            Language::Fr => LabelPack {
                user: "👤 Utilisateur",
                assistant: "🤖 Assistant",
                tool: "🔧",
                result: "✅ Résultat:",
                param: "Paramètres:",
                truncated: "... (contenu trop long, tronqué)",
            },
            Language::De => LabelPack {
                user: "👤 Benutzer",
                assistant: "🤖 Assistent",
                tool: "🔧",
                result: "✅ Ergebnis:",
                param: "Parameter:",
                truncated: "... (Inhalt zu lang, gekürzt)",
            },
            Language::Ja => LabelPack {
                user: "👤 ユーザー",
                assistant: "🤖 アシスタント",
                tool: "🔧",
                result: "✅ 結果:",
                param: "引数:",
                truncated: "... (内容が長すぎるため切り詰めました)",
            },
            Language::Ko => LabelPack {
                user: "👤 사용자",
                assistant: "🤖 어시스턴트",
                tool: "🔧",
                result: "✅ 결과:",
                param: "매개변수:",
                truncated: "... (내용이 너무 길어 잘렸습니다)",
            },
            Language::Ru => LabelPack {
                user: "👤 Пользователь",
                assistant: "🤖 Ассистент",
                tool: "🔧",
                result: "✅ Результат:",
                param: "Параметры:",
                truncated: "... (содержимое слишком длинное, обрезано)",
            },
            Language::Pt => LabelPack {
                user: "👤 Usuário",
                assistant: "🤖 Assistente",
                tool: "🔧",
                result: "✅ Resultado:",
                param: "Parâmetros:",
                truncated: "... (conteúdo muito longo, truncado)",
            },
            Language::It => LabelPack {
                user: "👤 Utente",
                assistant: "🤖 Assistente",
                tool: "🔧",
                result: "✅ Risultato:",
                param: "Parametri:",
                truncated: "... (contenuto troppo lungo, troncato)",
            },
        }
    }
}

impl FromStr for Language {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| ExportError::UnknownLanguage(s.to_string()))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
