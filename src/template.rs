//! Static prompt-template catalog.
//!
//! Each [`Template`] pairs display metadata (id, name, description, icon)
//! with a Japanese prompt body containing a `{fileName}` placeholder that is
//! substituted with the uploaded file's name at render time.  The catalog is
//! immutable and compiled in; `templates` on the CLI lists it.

/// Placeholder substituted with the audio file name when rendering.
const FILE_NAME_PLACEHOLDER: &str = "{fileName}";

/// A prompt template from the static catalog.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Stable identifier used on the command line (e.g. `detailed_minutes`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description of the output the template produces.
    pub description: &'static str,
    /// Icon shown next to the name in listings.
    pub icon: &'static str,
    /// Prompt body with the `{fileName}` placeholder.
    prompt: &'static str,
}

impl Template {
    /// Render the prompt for a concrete audio file, substituting every
    /// occurrence of `{fileName}`.
    pub fn render(&self, file_name: &str) -> String {
        self.prompt.replace(FILE_NAME_PLACEHOLDER, file_name)
    }
}

const DETAILED_MINUTES_PROMPT: &str = "\
あなたはプロの書記です。以下の音声データから、会話形式の議事録を作成してください。

# 指示
- 話者名を明確に記載してください（例：話者A、話者B）。
- 発言は「話者A: [発言内容]」の形式で記載してください。
- 誤字脱字を修正してください。
- 口語的な表現は適切な文語に変換してください。
- 「あー」「えー」などのフィラーは削除してください。

# 出力構成
## 会議情報
- 日時: (不明な場合は「不明」と記載)
- 場所/形式: (不明な場合は「不明」と記載)
- 参加者: (音声から特定できる範囲で記載)
- 議題: {fileName} に関する会議

## 議事内容
(ここに話者ごとの発言を記載)

## 決定事項
1. [決定事項1]
2. ...

## ネクストアクション
- [アクション内容]（担当：[担当者名]、期限：[日付]）
- ...
";

const SUMMARY_PROMPT: &str = "\
あなたは優秀なビジネスアナリストです。以下の音声データから、簡潔で分かりやすい議事概要を作成してください。

# 指示
- 重要なポイントのみを抽出してください。
- 箇条書きで簡潔に記載してください。
- 5W1Hを意識して記載してください。

# 出力構成
## 議事概要 - {fileName}

### 概要
会議の目的と主な議論内容を2-3文で要約してください。

### 決定事項
- [決定事項1]
- [決定事項2]
- ...

### ネクストアクション
- [何を]：[誰が]が[いつまでに]実施
- ...
";

const ACTION_ITEMS_PROMPT: &str = "\
あなたはプロジェクトマネージャーです。以下の音声データから、アクションアイテムの一覧を作成してください。

# 指示
- 決定事項と依頼事項をすべて抽出してください。
- 担当者と期限が音声から特定できる場合は必ず記載してください。
- 特定できない場合は「未定」と記載してください。
- 優先度（高・中・低）を内容から推定して付与してください。

# 出力構成
## アクションアイテム - {fileName}

| # | アクション | 担当 | 期限 | 優先度 |
|---|-----------|------|------|--------|
| 1 | ...       | ...  | ...  | ...    |
";

const TRANSCRIPT_PROMPT: &str = "\
あなたは正確な文字起こし担当者です。以下の音声データを、話者を分離した逐語の文字起こしにしてください。

# 指示
- 発言は「話者A: [発言内容]」の形式で記載してください。
- 発言内容は改変せず、聞こえたとおりに記載してください。
- 聞き取れない箇所は [不明瞭] と記載してください。

# 出力構成
## 文字起こし - {fileName}

(ここに発言を時系列で記載)
";

/// The compiled-in template catalog, in display order.
pub const CATALOG: &[Template] = &[
    Template {
        id: "detailed_minutes",
        name: "議事録 (詳細)",
        description: "話者ごとの発言・決定事項・ネクストアクションを含む会話形式の議事録",
        icon: "📝",
        prompt: DETAILED_MINUTES_PROMPT,
    },
    Template {
        id: "summary",
        name: "議事概要 (要約)",
        description: "重要ポイントだけを箇条書きにした簡潔な議事概要",
        icon: "📋",
        prompt: SUMMARY_PROMPT,
    },
    Template {
        id: "action_items",
        name: "アクションアイテム",
        description: "担当・期限・優先度つきのアクションアイテム一覧",
        icon: "✅",
        prompt: ACTION_ITEMS_PROMPT,
    },
    Template {
        id: "transcript",
        name: "文字起こし",
        description: "話者を分離した逐語の文字起こし",
        icon: "🎙️",
        prompt: TRANSCRIPT_PROMPT,
    },
];

/// Look up a template by its id.
pub fn find(id: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.id == id)
}

/// The template used when the user does not choose one.
pub fn default_template() -> &'static Template {
    &CATALOG[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detailed_minutes_renders_file_name() {
        let template = find("detailed_minutes").expect("catalog entry");
        let prompt = template.render("meeting.mp3");

        assert!(prompt.contains("meeting.mp3"));
        assert!(!prompt.contains(FILE_NAME_PLACEHOLDER));
    }

    #[test]
    fn every_template_has_the_placeholder() {
        for template in CATALOG {
            assert!(
                template.prompt.contains(FILE_NAME_PLACEHOLDER),
                "template {} is missing the placeholder",
                template.id
            );
        }
    }

    #[test]
    fn every_template_renders_without_leftover_placeholder() {
        for template in CATALOG {
            let prompt = template.render("kickoff.wav");
            assert!(prompt.contains("kickoff.wav"), "template {}", template.id);
            assert!(
                !prompt.contains(FILE_NAME_PLACEHOLDER),
                "template {}",
                template.id
            );
        }
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn find_unknown_id_returns_none() {
        assert!(find("does_not_exist").is_none());
    }

    #[test]
    fn default_template_is_detailed_minutes() {
        assert_eq!(default_template().id, "detailed_minutes");
    }
}
