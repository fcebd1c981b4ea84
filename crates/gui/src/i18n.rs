use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    #[default]
    Ja,
    En,
}

impl Lang {
    pub fn toggled(self) -> Lang {
        match self {
            Lang::Ja => Lang::En,
            Lang::En => Lang::Ja,
        }
    }

    /// Label of the language toggle (names the language it switches to)
    pub fn toggle_label(self) -> &'static str {
        match self {
            Lang::Ja => "English",
            Lang::En => "日本語",
        }
    }
}

/// Translate a key to the given language.
pub fn t(lang: Lang, key: &str) -> &'static str {
    let ja = lang == Lang::Ja;
    match key {
        // ── Top bar ─────────────────────────────────────────
        "app.title" => if ja { "筋肉痛マップ" } else { "Muscle Pain Map" },
        "top.front" => if ja { "正面" } else { "Front" },
        "top.back" => if ja { "背面" } else { "Back" },
        "top.export" => if ja { "画像を保存" } else { "Save image" },
        "top.export_title" => if ja { "画像を保存" } else { "Save image" },
        "tip.front" => if ja { "正面から見る (F)" } else { "View from the front (F)" },
        "tip.back" => if ja { "背面から見る (B)" } else { "View from the back (B)" },
        "tip.export" => if ja { "現在の表示をPNGで保存" } else { "Save the current view as PNG" },

        // ── Calendar ────────────────────────────────────────
        "cal.prev" => "◀",
        "cal.next" => "▶",
        "cal.today" => if ja { "今日" } else { "Today" },
        "tip.prev_month" => if ja { "前の月" } else { "Previous month" },
        "tip.next_month" => if ja { "次の月" } else { "Next month" },
        "cal.legend_data" => if ja { "記録あり" } else { "Has records" },

        // ── Severity panel ──────────────────────────────────
        "panel.title" => if ja { "痛みの強さ" } else { "Pain level" },
        "panel.close" => if ja { "閉じる" } else { "Close" },
        "sev.0" => if ja { "なし" } else { "None" },
        "sev.1" => if ja { "弱" } else { "Mild" },
        "sev.2" => if ja { "中" } else { "Moderate" },
        "sev.3" => if ja { "強" } else { "Severe" },

        // ── Status bar ──────────────────────────────────────
        "status.date" => if ja { "日付" } else { "Date" },
        "status.recorded" => if ja { "記録部位" } else { "Recorded parts" },
        "status.days" => if ja { "記録日数" } else { "Days with records" },
        "status.hint" => if ja { "部位をクリックして痛みを記録" } else { "Click a body part to record pain" },
        "status.saved" => if ja { "保存しました" } else { "Saved" },

        // ── Errors ──────────────────────────────────────────
        "err.model" => if ja { "3Dモデルを読み込めませんでした" } else { "Failed to load the 3D model" },
        "err.no_gl" => if ja { "OpenGLが利用できません" } else { "OpenGL is not available" },
        "err.export" => if ja { "画像を保存できませんでした" } else { "Failed to save the image" },

        _ => "???",
    }
}

/// Label for a severity button
pub fn severity_label(lang: Lang, severity: shared::Severity) -> &'static str {
    match severity.level() {
        0 => t(lang, "sev.0"),
        1 => t(lang, "sev.1"),
        2 => t(lang, "sev.2"),
        _ => t(lang, "sev.3"),
    }
}

/// Weekday column headers, Sunday first
pub fn weekday_labels(lang: Lang) -> [&'static str; 7] {
    match lang {
        Lang::Ja => ["日", "月", "火", "水", "木", "金", "土"],
        Lang::En => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    }
}

/// Month header, e.g. `2024年5月` or `May 2024`
pub fn month_header(lang: Lang, year: i32, month: u32) -> String {
    match lang {
        Lang::Ja => format!("{year}年{month}月"),
        Lang::En => {
            let name = u8::try_from(month)
                .ok()
                .and_then(|m| chrono::Month::try_from(m).ok())
                .map_or("?", |m| m.name());
            format!("{name} {year}")
        }
    }
}

/// Human-readable name for a mesh part.
///
/// Covers the parts of the bundled sample mannequin; any other mesh name is
/// shown as-is.
pub fn part_display_name(lang: Lang, part: &str) -> String {
    let (side, base) = if let Some(rest) = part.strip_prefix("left_") {
        (Some(true), rest)
    } else if let Some(rest) = part.strip_prefix("right_") {
        (Some(false), rest)
    } else {
        (None, part)
    };

    let ja = lang == Lang::Ja;
    let name = match base {
        "head" => if ja { "頭" } else { "Head" },
        "neck" => if ja { "首" } else { "Neck" },
        "chest" => if ja { "胸" } else { "Chest" },
        "abdomen" => if ja { "腹" } else { "Abdomen" },
        "pelvis" => if ja { "骨盤" } else { "Pelvis" },
        "shoulder" => if ja { "肩" } else { "Shoulder" },
        "upper_arm" => if ja { "上腕" } else { "Upper arm" },
        "forearm" => if ja { "前腕" } else { "Forearm" },
        "hand" => if ja { "手" } else { "Hand" },
        "thigh" => if ja { "太もも" } else { "Thigh" },
        "calf" => if ja { "ふくらはぎ" } else { "Calf" },
        "foot" => if ja { "足" } else { "Foot" },
        _ => return part.to_string(),
    };

    match (side, ja) {
        (None, _) => name.to_string(),
        (Some(true), true) => format!("左{name}"),
        (Some(false), true) => format!("右{name}"),
        (Some(true), false) => format!("Left {}", name.to_lowercase()),
        (Some(false), false) => format!("Right {}", name.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_header_formats() {
        assert_eq!(month_header(Lang::Ja, 2024, 5), "2024年5月");
        assert_eq!(month_header(Lang::En, 2024, 5), "May 2024");
        assert_eq!(month_header(Lang::En, 2023, 12), "December 2023");
        assert_eq!(month_header(Lang::En, 2024, 13), "? 2024");
    }

    #[test]
    fn test_part_display_names() {
        assert_eq!(part_display_name(Lang::Ja, "left_forearm"), "左前腕");
        assert_eq!(part_display_name(Lang::En, "right_calf"), "Right calf");
        assert_eq!(part_display_name(Lang::En, "neck"), "Neck");
        assert_eq!(part_display_name(Lang::Ja, "Object_17"), "Object_17");
    }

    #[test]
    fn test_every_key_used_by_the_ui_is_translated() {
        for key in ["app.title", "panel.title", "cal.today", "err.model", "sev.3"] {
            assert_ne!(t(Lang::Ja, key), "???");
            assert_ne!(t(Lang::En, key), "???");
        }
    }
}
