//! Issue metadata extraction
//!
//! Turns the free-text body of a registration issue into a typed
//! [`RegistrationRecord`]. Extraction is best-effort: a body that does not
//! follow the form yields a record with empty or absent fields, never an error.

pub mod sections;

pub use sections::{IssueSections, Section};

use crate::types::{AdapterInfo, BotInfo, ExtensionType, PluginInfo, RegistrationRecord};

/// Headings a registration form uses for each field.
///
/// Every field lists the store's own issue-form heading first, followed by
/// the English heading accepted for hand-written issues. Lookup takes the
/// first heading that has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormHeadings {
    /// Display name
    pub name: &'static [&'static str],
    /// Short description
    pub description: &'static [&'static str],
    /// Homepage or repository link
    pub homepage: &'static [&'static str],
    /// Tag list
    pub tags: &'static [&'static str],
    /// Package index project name
    pub project_link: &'static [&'static str],
    /// Import module name
    pub module_name: &'static [&'static str],
    /// Fenced configuration block
    pub config: &'static [&'static str],
}

const TAGS: &[&str] = &["标签", "Tags"];
const PROJECT_LINK: &[&str] = &["PyPI 项目名", "PyPI project name"];

/// Bot registration form
pub const BOT_FORM: FormHeadings = FormHeadings {
    name: &["机器人名称", "Name"],
    description: &["机器人描述", "Description"],
    homepage: &["机器人项目仓库/主页链接", "Homepage"],
    tags: TAGS,
    project_link: &[],
    module_name: &[],
    config: &[],
};

/// Adapter registration form
pub const ADAPTER_FORM: FormHeadings = FormHeadings {
    name: &["适配器名称", "Name"],
    description: &["适配器描述", "Description"],
    homepage: &["适配器项目仓库/主页链接", "Homepage"],
    tags: TAGS,
    project_link: PROJECT_LINK,
    module_name: &["适配器 import 包名", "Import module name"],
    config: &[],
};

/// Plugin registration form
pub const PLUGIN_FORM: FormHeadings = FormHeadings {
    name: &["插件名称", "Name"],
    description: &["插件描述", "Description"],
    homepage: &["插件项目仓库/主页链接", "Homepage"],
    tags: TAGS,
    project_link: PROJECT_LINK,
    module_name: &["插件 import 包名", "Import module name"],
    config: &["插件配置项", "Plugin configuration"],
};

impl FormHeadings {
    /// Form used to register `extension_type`
    #[inline]
    pub const fn for_type(extension_type: ExtensionType) -> &'static FormHeadings {
        match extension_type {
            ExtensionType::Bot => &BOT_FORM,
            ExtensionType::Adapter => &ADAPTER_FORM,
            ExtensionType::Plugin => &PLUGIN_FORM,
        }
    }
}

/// Build a registration record for `extension_type` from an issue body.
///
/// `author` is stamped verbatim; it comes from the issue metadata, not the body.
pub fn extract_info(extension_type: ExtensionType, body: &str, author: &str) -> RegistrationRecord {
    let form = FormHeadings::for_type(extension_type);
    let sections = IssueSections::parse(body);

    let name = first_line(&sections, form.name).unwrap_or_default();
    let author = author.to_string();
    let description = first_value(&sections, form.description).map(str::to_string);
    let homepage = first_line(&sections, form.homepage);
    let tags = first_value(&sections, form.tags)
        .map(parse_tags)
        .unwrap_or_default();

    match extension_type {
        ExtensionType::Bot => RegistrationRecord::Bot(BotInfo {
            name,
            author,
            description,
            homepage,
            tags,
        }),
        ExtensionType::Adapter => RegistrationRecord::Adapter(AdapterInfo {
            name,
            author,
            description,
            project_link: first_line(&sections, form.project_link),
            module_name: first_line(&sections, form.module_name),
            homepage,
            tags,
        }),
        ExtensionType::Plugin => RegistrationRecord::Plugin(PluginInfo {
            name,
            author,
            description,
            project_link: first_line(&sections, form.project_link),
            module_name: first_line(&sections, form.module_name),
            homepage,
            tags,
            config: headings_find(form.config, |h| sections.fenced(h)).map(str::to_string),
        }),
    }
}

#[inline]
fn headings_find<'a>(
    headings: &[&str],
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> Option<&'a str> {
    headings.iter().find_map(|h| lookup(h))
}

fn first_value<'a>(sections: &IssueSections<'a>, headings: &[&str]) -> Option<&'a str> {
    headings_find(headings, |h| sections.value(h))
}

fn first_line(sections: &IssueSections<'_>, headings: &[&str]) -> Option<String> {
    headings_find(headings, |h| sections.line(h)).map(str::to_string)
}

/// Parse the tags field.
///
/// The store form submits a JSON array of `{"label": .., "color": ..}`
/// objects; hand-written issues tend to use plain strings or a comma list.
/// Entries that are neither are dropped.
pub fn parse_tags(raw: &str) -> Vec<String> {
    if let Ok(serde_json::Value::Array(items)) = serde_json::from_str::<serde_json::Value>(raw) {
        return items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s.as_str()),
                serde_json::Value::Object(obj) => obj.get("label").and_then(|l| l.as_str()),
                _ => None,
            })
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLUGIN_BODY: &str = "### Name\n\necho-plugin\n\n### Description\n\nEchoes messages\n\n\
### PyPI project name\n\nnonebot-plugin-echo\n\n### Import module name\n\nnonebot_plugin_echo\n\n\
### Homepage\n\nhttps://example.com/echo\n\n### Tags\n\n[{\"label\": \"fun\", \"color\": \"#ea5252\"}]\n\n\
### Plugin configuration\n\n```dotenv\nECHO_PREFIX=!\n```\n";

    #[test]
    fn test_plugin_full_record() {
        let record = extract_info(ExtensionType::Plugin, PLUGIN_BODY, "alice");
        let RegistrationRecord::Plugin(info) = record else {
            panic!("expected plugin record");
        };
        assert_eq!(info.name, "echo-plugin");
        assert_eq!(info.author, "alice");
        assert_eq!(info.description.as_deref(), Some("Echoes messages"));
        assert_eq!(info.project_link.as_deref(), Some("nonebot-plugin-echo"));
        assert_eq!(info.module_name.as_deref(), Some("nonebot_plugin_echo"));
        assert_eq!(info.homepage.as_deref(), Some("https://example.com/echo"));
        assert_eq!(info.tags, vec!["fun".to_string()]);
        assert_eq!(info.config.as_deref(), Some("ECHO_PREFIX=!"));
    }

    #[test]
    fn test_bot_record() {
        let body = "### Name\n\nweatherbot\n\n### Homepage\n\nhttps://example.com/wb\n";
        let record = extract_info(ExtensionType::Bot, body, "bob");
        assert_eq!(record.extension_type(), ExtensionType::Bot);
        assert_eq!(record.name(), "weatherbot");
        assert_eq!(record.author(), "bob");
    }

    #[test]
    fn test_adapter_record_fields() {
        let body = "### Name\n\nOneBot\n\n### Import module name\n\nnonebot.adapters.onebot\n";
        let RegistrationRecord::Adapter(info) = extract_info(ExtensionType::Adapter, body, "")
        else {
            panic!("expected adapter record");
        };
        assert_eq!(info.name, "OneBot");
        assert_eq!(info.module_name.as_deref(), Some("nonebot.adapters.onebot"));
        assert_eq!(info.project_link, None);
        assert_eq!(info.author, "");
    }

    #[test]
    fn test_malformed_body_degrades() {
        for body in ["", "no headings", "###", "### \n\n", "```\n### Name"] {
            for ty in ExtensionType::ALL {
                let record = extract_info(ty, body, "carol");
                assert_eq!(record.extension_type(), ty);
                assert_eq!(record.author(), "carol");
                assert_eq!(record.name(), "", "body {:?}", body);
            }
        }
    }

    #[test]
    fn test_name_uses_first_line() {
        let record = extract_info(ExtensionType::Bot, "### Name\n\n  spaced  \nsecond\n", "");
        assert_eq!(record.name(), "spaced");
    }

    #[test]
    fn test_store_plugin_form() {
        let body = "### 插件名称\n\necho\n\n### 插件描述\n\n复读消息\n\n\
### PyPI 项目名\n\nnonebot-plugin-echo\n\n### 插件 import 包名\n\nnonebot_plugin_echo\n\n\
### 插件项目仓库/主页链接\n\nhttps://example.com/echo\n\n\
### 标签\n\n[{\"label\": \"fun\", \"color\": \"#ea5252\"}]\n\n\
### 插件配置项\n\n```dotenv\nA=1\n```\n";
        let RegistrationRecord::Plugin(info) = extract_info(ExtensionType::Plugin, body, "alice")
        else {
            panic!("expected plugin record");
        };
        assert_eq!(info.name, "echo");
        assert_eq!(info.description.as_deref(), Some("复读消息"));
        assert_eq!(info.project_link.as_deref(), Some("nonebot-plugin-echo"));
        assert_eq!(info.module_name.as_deref(), Some("nonebot_plugin_echo"));
        assert_eq!(info.homepage.as_deref(), Some("https://example.com/echo"));
        assert_eq!(info.tags, vec!["fun".to_string()]);
        assert_eq!(info.config.as_deref(), Some("A=1"));
    }

    #[test]
    fn test_store_bot_and_adapter_forms() {
        let body = "### 机器人名称\n\nweatherbot\n\n### 机器人项目仓库/主页链接\n\nhttps://example.com/wb\n";
        let RegistrationRecord::Bot(info) = extract_info(ExtensionType::Bot, body, "bob") else {
            panic!("expected bot record");
        };
        assert_eq!(info.name, "weatherbot");
        assert_eq!(info.homepage.as_deref(), Some("https://example.com/wb"));

        let body = "### 适配器名称\n\nOneBot V11\n\n### 适配器 import 包名\n\nnonebot.adapters.onebot.v11\n";
        let RegistrationRecord::Adapter(info) = extract_info(ExtensionType::Adapter, body, "")
        else {
            panic!("expected adapter record");
        };
        assert_eq!(info.name, "OneBot V11");
        assert_eq!(info.module_name.as_deref(), Some("nonebot.adapters.onebot.v11"));
    }

    #[test]
    fn test_name_heading_belongs_to_type() {
        let body = "### 插件名称\n\necho\n";
        assert_eq!(extract_info(ExtensionType::Plugin, body, "").name(), "echo");
        assert_eq!(extract_info(ExtensionType::Bot, body, "").name(), "");
    }

    #[test]
    fn test_store_heading_takes_precedence() {
        let body = "### Name\n\nenglish\n\n### 插件名称\n\nstore\n";
        assert_eq!(extract_info(ExtensionType::Plugin, body, "").name(), "store");

        let body = "### 插件名称\n\n_No response_\n\n### Name\n\nfallback\n";
        assert_eq!(extract_info(ExtensionType::Plugin, body, "").name(), "fallback");
    }

    #[test]
    fn test_hash_value_skipped() {
        let body = "### PyPI 项目名\n\n#### 插件 import 包名\n\nnonebot_plugin_echo\n";
        let RegistrationRecord::Plugin(info) = extract_info(ExtensionType::Plugin, body, "") else {
            panic!("expected plugin record");
        };
        assert_eq!(info.project_link, None);
    }

    #[test]
    fn test_parse_tags_variants() {
        assert_eq!(parse_tags(r#"["a", " b ", ""]"#), vec!["a", "b"]);
        assert_eq!(
            parse_tags(r##"[{"label": "x", "color": "#fff"}, {"color": "#000"}, 3]"##),
            vec!["x"]
        );
        assert_eq!(parse_tags("one, two,,three"), vec!["one", "two", "three"]);
        assert!(parse_tags("[]").is_empty());
    }
}
