// Multi-language support module
// Provides localized UI strings for English and Chinese

use log::warn;

#[derive(Clone)]
pub struct Assets {
    // Status line
    pub status_flags_fmt: &'static str, // "Flags left: {}"
    pub status_lost: &'static str,
    pub status_won: &'static str,

    // Key hints
    pub hint_play: &'static str,
    pub hint_debug: &'static str,

    // Terminal size messages
    pub tsmsg_line1: &'static str,
    pub tsmsg_line2: &'static str, // "Minimum size required: {} x {}"
    pub tsmsg_title: &'static str,
}

/// Returns English language assets
pub fn english_assets() -> Assets {
    Assets {
        status_flags_fmt: "Flags left: {}",
        status_lost: "Boom! Game over",
        status_won: "Field cleared!",

        hint_play: "L-Click reveal  R-Click flag  N new  Esc exit",
        hint_debug: "R regenerate  T reveal all",

        tsmsg_line1: "Terminal layout too small",
        tsmsg_line2: "Minimum size required: {} x {}",
        tsmsg_title: "Resize needed",
    }
}

/// Returns Chinese language assets
pub fn chinese_assets() -> Assets {
    Assets {
        status_flags_fmt: "剩余旗帜: {}",
        status_lost: "踩雷了! 游戏结束",
        status_won: "扫雷成功!",

        hint_play: "左键 翻开  右键 插旗  N 新游戏  Esc 退出",
        hint_debug: "R 重新布雷  T 全部翻开",

        tsmsg_line1: "终端窗口太小",
        tsmsg_line2: "最小尺寸: {} x {}",
        tsmsg_title: "请调整窗口",
    }
}

/// Fill the single `{}` placeholder of a format string
pub fn fill(fmt: &str, value: impl std::fmt::Display) -> String {
    fmt.replacen("{}", &value.to_string(), 1)
}

pub struct Lang {
    pub current_lang: String,
    pub assets: Assets,
}

impl Lang {
    /// Create language resources for a code such as "en", "zh" or "zh-CN"
    /// Unknown codes fall back to English
    pub fn new(lang_code: &str) -> Self {
        let normalized = lang_code.to_lowercase();
        let code = if normalized.starts_with("zh") {
            "zh"
        } else {
            if !normalized.starts_with("en") {
                warn!("unsupported language {lang_code:?}, using English");
            }
            "en"
        };

        Lang {
            current_lang: code.to_string(),
            assets: if code == "zh" {
                chinese_assets()
            } else {
                english_assets()
            },
        }
    }

    pub fn flags_left(&self, count: usize) -> String {
        fill(self.assets.status_flags_fmt, count)
    }

    pub fn min_size(&self, w: u16, h: u16) -> String {
        fill(&fill(self.assets.tsmsg_line2, w), h)
    }
}
