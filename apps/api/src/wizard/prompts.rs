//! Prompt templates and builders for the reflection rounds and the final comment.
//!
//! Builders are pure. Each template is filled in a single pass, so user text that
//! happens to contain `{post}` or `{format}` is embedded as written.

use crate::wizard::models::{Profile, SourcePost};
use crate::wizard::tone::Tone;

/// Output layout shared by every reflection prompt. The parser splits on the blank lines.
pub const REFLECTION_FORMAT: &str = "Format (keep the labels and the blank lines between sections exactly):
QUESTION: [your question]

EXAMPLES:
1. [example 1]
2. [example 2]
3. [example 3]

CONSIDER:
- [key point 1]
- [key point 2]
- [key point 3]";

/// First-round prompt. Replace: {post}, {profile}, {format}
pub const FIRST_REFLECTION_TEMPLATE: &str = "Given this LinkedIn post and user profile, generate:
1. A thought-provoking question that helps identify what resonates personally and professionally
2. Three example responses (2-3 sentences each)
3. Three key phrases/points they might consider

Post: {post}

Profile:
{profile}

{format}";

/// Follow-up prompt for rounds after the first. Replace: {post}, {responses}, {format}
pub const FOLLOW_UP_REFLECTION_TEMPLATE: &str = "Based on previous responses, generate:
1. A follow-up question that builds on their thoughts
2. Three potential ways to expand their response (2-3 sentences each)
3. Three key points to consider

Post: {post}

Previous Responses:
{responses}

Follow the same three-section format as the first round:
{format}";

/// Final comment prompt. Replace: {tone}, {responses}, {post}
pub const COMMENT_TEMPLATE: &str = "Create a {tone} LinkedIn comment that:
1. Integrates these responses thoughtfully:
{responses}
2. Maintains professional LinkedIn standards
3. Shows authentic engagement with the original post
4. Includes a relevant question or discussion point
5. Is concise yet impactful

Original post: {post}";

/// Builds the prompt for a reflection round. An empty `prior_responses` means round one.
pub fn build_reflection_prompt(
    post: &SourcePost,
    prior_responses: &[String],
    profile: &Profile,
) -> String {
    if prior_responses.is_empty() {
        fill(
            FIRST_REFLECTION_TEMPLATE,
            &[
                ("{post}", post.content.as_str()),
                ("{profile}", render_profile(profile).as_str()),
                ("{format}", REFLECTION_FORMAT),
            ],
        )
    } else {
        fill(
            FOLLOW_UP_REFLECTION_TEMPLATE,
            &[
                ("{post}", post.content.as_str()),
                ("{responses}", render_responses(prior_responses).as_str()),
                ("{format}", REFLECTION_FORMAT),
            ],
        )
    }
}

/// Builds the prompt for the final comment. Every response is embedded verbatim.
pub fn build_comment_prompt(tone: Tone, responses: &[String], post: &SourcePost) -> String {
    fill(
        COMMENT_TEMPLATE,
        &[
            ("{tone}", tone.adjective().as_str()),
            ("{responses}", render_responses(responses).as_str()),
            ("{post}", post.content.as_str()),
        ],
    )
}

/// Substitutes placeholders in `template` left to right. Inserted values are never rescanned.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn render_profile(profile: &Profile) -> String {
    format!(
        "- Name: {}\n- Role: {}\n- Industry: {}\n- Areas of expertise: {}",
        profile.name,
        profile.title,
        profile.industry.as_str(),
        profile.expertise
    )
}

fn render_responses(responses: &[String]) -> String {
    responses
        .iter()
        .enumerate()
        .map(|(i, response)| format!("{}. {}", i + 1, response))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::models::Industry;

    fn profile() -> Profile {
        Profile {
            name: "Ana".to_string(),
            title: "PM".to_string(),
            industry: Industry::Technology,
            expertise: "growth".to_string(),
        }
    }

    fn post() -> SourcePost {
        SourcePost {
            content: "We shipped a new feature...".to_string(),
        }
    }

    #[test]
    fn test_first_round_prompt_embeds_post_and_profile() {
        let prompt = build_reflection_prompt(&post(), &[], &profile());
        assert!(prompt.contains("Given this LinkedIn post and user profile"));
        assert!(prompt.contains("We shipped a new feature..."));
        assert!(prompt.contains("- Name: Ana"));
        assert!(prompt.contains("- Role: PM"));
        assert!(prompt.contains("- Industry: Technology"));
        assert!(prompt.contains("- Areas of expertise: growth"));
        assert!(prompt.contains("QUESTION:"));
        assert!(prompt.contains("EXAMPLES:"));
        assert!(prompt.contains("CONSIDER:"));
        assert!(!prompt.contains('{'), "no placeholder left behind: {prompt}");
    }

    #[test]
    fn test_follow_up_prompt_embeds_prior_responses_and_format() {
        let prior = vec![
            "The focus on onboarding.".to_string(),
            "We had the same churn problem.".to_string(),
        ];
        let prompt = build_reflection_prompt(&post(), &prior, &profile());
        assert!(prompt.contains("Based on previous responses"));
        assert!(prompt.contains("1. The focus on onboarding."));
        assert!(prompt.contains("2. We had the same churn problem."));
        assert!(prompt.contains("We shipped a new feature..."));
        assert!(prompt.contains("QUESTION:"));
        assert!(prompt.contains("EXAMPLES:"));
        assert!(prompt.contains("CONSIDER:"));
        assert!(!prompt.contains("- Name: Ana"));
    }

    #[test]
    fn test_format_block_separates_sections_with_blank_lines() {
        let sections: Vec<&str> = REFLECTION_FORMAT.split("\n\n").collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[0].ends_with("QUESTION: [your question]"));
        assert!(sections[1].starts_with("EXAMPLES:"));
        assert!(sections[2].starts_with("CONSIDER:"));
    }

    #[test]
    fn test_comment_prompt_end_to_end_scenario() {
        let responses = vec![
            "The launch cadence impressed me.".to_string(),
            "I ran a similar growth experiment last year.".to_string(),
            "I'd add a note on measuring retention.".to_string(),
        ];
        let prompt = build_comment_prompt(Tone::Expert, &responses, &post());
        assert!(prompt.contains("Create a expert LinkedIn comment"));
        assert!(prompt.contains("expert"));
        for response in &responses {
            assert!(prompt.contains(response.as_str()));
        }
        assert!(prompt.contains("Original post: We shipped a new feature..."));
        assert!(prompt.contains("Includes a relevant question or discussion point"));
    }

    #[test]
    fn test_braces_in_post_are_kept_verbatim() {
        let post = SourcePost {
            content: "Literal {responses} and {tone} in a post".to_string(),
        };
        let prompt = build_comment_prompt(Tone::Supportive, &["ok".to_string()], &post);
        assert!(prompt.contains("Literal {responses} and {tone} in a post"));
    }

    #[test]
    fn test_placeholders_in_responses_are_kept_verbatim() {
        let responses = vec![
            "I loved the {post} section".to_string(),
            "Not {tone}, not {responses}".to_string(),
            "See {format}".to_string(),
        ];
        let prompt = build_comment_prompt(Tone::Expert, &responses, &post());
        assert!(prompt.contains("1. I loved the {post} section"));
        assert!(prompt.contains("2. Not {tone}, not {responses}"));
        assert!(prompt.contains("3. See {format}"));
        assert_eq!(prompt.matches("We shipped a new feature...").count(), 1);

        let prompt = build_reflection_prompt(&post(), &responses, &profile());
        assert!(prompt.contains("1. I loved the {post} section"));
        assert!(prompt.contains("3. See {format}"));
        assert_eq!(prompt.matches("QUESTION:").count(), 1);
    }

    #[test]
    fn test_placeholders_in_profile_are_kept_verbatim() {
        let profile = Profile {
            expertise: "templating like {format} and {post}".to_string(),
            ..profile()
        };
        let prompt = build_reflection_prompt(&post(), &[], &profile);
        assert!(prompt.contains("- Areas of expertise: templating like {format} and {post}"));
        assert_eq!(prompt.matches("QUESTION:").count(), 1);
        assert_eq!(prompt.matches("We shipped a new feature...").count(), 1);
    }

    #[test]
    fn test_fill_leaves_unknown_braces_alone() {
        let filled = fill("a {x} {b} {", &[("{x}", "1")]);
        assert_eq!(filled, "a 1 {b} {");
    }
}
