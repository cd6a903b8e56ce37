//! Portfolio wire/data model. Supplied by the caller, returned reordered —
//! the engine never persists or mutates content, only order.

use serde::{Deserialize, Serialize};

/// A candidate's portfolio snapshot. `skills` and `projects` are the only
/// fields the remodel pipeline reorders; everything else passes through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub name: String,
    pub role: String,
    pub introduction: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_deserializes_camel_case() {
        let json = r#"{
            "name": "전소원",
            "role": "Backend Developer",
            "introduction": "Spring 기반 백엔드 개발자입니다.",
            "skills": ["Java", "Spring Boot"],
            "projects": [{
                "title": "주문/결제 백엔드",
                "summary": "결제 이중화",
                "role": "Backend",
                "period": "2024.01~2024.08",
                "link": "https://github.com/example/ecommerce",
                "techStack": ["Java", "MySQL"]
            }]
        }"#;

        let snapshot: PortfolioSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.skills.len(), 2);
        assert_eq!(snapshot.projects[0].tech_stack, vec!["Java", "MySQL"]);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let json = r#"{"name":"a","role":"b","introduction":"c"}"#;
        let snapshot: PortfolioSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.skills.is_empty());
        assert!(snapshot.projects.is_empty());
    }

    #[test]
    fn test_tech_stack_serializes_camel_case() {
        let project = ProjectItem {
            title: "t".to_string(),
            summary: String::new(),
            role: String::new(),
            period: String::new(),
            link: String::new(),
            tech_stack: vec!["Java".to_string()],
        };
        let json = serde_json::to_string(&project).unwrap();
        assert!(json.contains(r#""techStack""#));
    }
}
