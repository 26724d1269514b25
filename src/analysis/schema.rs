//! Response schema sent with every analysis request.
//!
//! Uses the OpenAPI subset accepted by Gemini's `responseSchema`. Field names
//! match the serde names of [`super::AnalysisResult`].

use serde_json::{json, Value};

/// Build the response schema for an [`super::AnalysisResult`].
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "stats": stats_schema(),
            "narrative": narrative_schema(),
            "suggestions": suggestions_schema(),
        },
        "required": ["stats", "narrative", "suggestions"],
    })
}

fn string_list(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description,
    })
}

fn text(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn stats_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "maleCount": { "type": "INTEGER" },
            "femaleCount": { "type": "INTEGER" },
            "unknownCount": { "type": "INTEGER" },
            "maleRoles": string_list("仅提取明确的职业头衔（如'科长'）。如果仅仅是动作或家庭分工，忽略。"),
            "femaleRoles": string_list("仅提取明确的职业头衔。如果没有，返回空数组。"),
        },
        "required": ["maleCount", "femaleCount", "unknownCount", "maleRoles", "femaleRoles"],
    })
}

fn narrative_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "powerDynamics": text(
                "详细分析叙事逻辑与权力结构（150字左右）。指出谁是权力主体（如'订计划'的人），谁是被动的接受者；谁是规则制定者，谁是服从者。"
            ),
            "adjectiveAnalysis": text(
                "详细分析人物特质与形容词使用（150字左右）。指出男性是否有体现能力的形容词（如'擅长'、'一丝不苟'）；对比女性是否缺乏独立性格描写，仅通过被分配的任务呈现。"
            ),
            "socialRoles": text(
                "详细分析社会角色或行为角色（150字左右）。分析男性是否横跨公共与私人领域或处于行为核心；女性是否被局限于家庭或辅助性角色。"
            ),
            "summary": text("一句话总结文本中的核心偏见逻辑。"),
        },
        "required": ["powerDynamics", "adjectiveAnalysis", "socialRoles", "summary"],
    })
}

fn suggestions_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "rewriteTips": string_list("具体的文本修改建议点（中文）。"),
            "reflectionQuestions": string_list("用于启发批判性思维的问题（中文）。"),
        },
        "required": ["rewriteTips", "reflectionQuestions"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(value: &Value) -> Vec<&str> {
        value["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_every_property_is_required() {
        let schema = response_schema();
        assert_eq!(required(&schema), vec!["stats", "narrative", "suggestions"]);

        for section in ["stats", "narrative", "suggestions"] {
            let section_schema = &schema["properties"][section];
            let props: Vec<&str> = section_schema["properties"]
                .as_object()
                .unwrap()
                .keys()
                .map(String::as_str)
                .collect();
            let mut req = required(section_schema);
            let mut props_sorted = props.clone();
            req.sort_unstable();
            props_sorted.sort_unstable();
            assert_eq!(req, props_sorted, "section {section}");
        }
    }

    #[test]
    fn test_schema_matches_result_field_names() {
        let sample = serde_json::to_value(crate::analysis::AnalysisResult::default()).unwrap();
        let schema = response_schema();
        for section in ["stats", "narrative", "suggestions"] {
            for key in sample[section].as_object().unwrap().keys() {
                assert!(
                    schema["properties"][section]["properties"].get(key).is_some(),
                    "schema is missing {section}.{key}"
                );
            }
        }
    }

    #[test]
    fn test_counts_are_integers() {
        let stats = &response_schema()["properties"]["stats"]["properties"];
        assert_eq!(stats["maleCount"]["type"], "INTEGER");
        assert_eq!(stats["maleRoles"]["items"]["type"], "STRING");
    }
}
