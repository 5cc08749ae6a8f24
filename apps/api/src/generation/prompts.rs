// All LLM prompt constants for the generation pipeline.
// Cross-cutting fragments live in llm_client::prompts.

/// System prompt for the business translator. JSON-returning agents append
/// `JSON_ONLY_INSTRUCTION` from `llm_client::prompts` at call time.
pub const TRANSLATOR_SYSTEM: &str =
    "You are an experienced project manager and business analyst specialized \
    in data science and AI projects. You excel at breaking down complex \
    requirements into manageable tasks with accurate time estimates.";

/// Translator prompt template.
/// Replace: {job_title}, {job_description}, {budget_range}, {skills_required},
///          {hourly_rate}, {skills}, {experience_years}, {specializations},
///          {feedback_block}
pub const TRANSLATOR_PROMPT_TEMPLATE: &str = r#"Based on the job posting and freelancer profile, create a detailed execution plan.

Job Post:
Title: {job_title}
Description: {job_description}
Budget Range: {budget_range}
Required Skills: {skills_required}

Freelancer Profile:
Hourly Rate: ${hourly_rate}
Skills: {skills}
Experience: {experience_years} years
Specializations: {specializations}

{feedback_block}

Create an execution plan with the following structure:
- Break down the project into specific, measurable tasks
- Estimate hours for each task realistically
- Assign appropriate roles (Data Scientist, ML Engineer, etc.)
- Classify tasks as mandatory, optional, or nice_to_have
- Consider dependencies between tasks

Return as JSON with this structure:
{
    "tasks": [
        {
            "task": "Task name",
            "description": "Detailed description",
            "role": "Role required",
            "hours": estimated_hours,
            "priority": "mandatory|optional|nice_to_have",
            "dependencies": ["prerequisite_tasks"]
        }
    ],
    "notes": ["Important considerations"]
}"#;

/// System prompt for the costing agent.
pub const COSTING_SYSTEM: &str =
    "You are a financial analyst specialized in technology projects. You have \
    deep experience in project costing, resource planning, and budget \
    optimization for data science and AI initiatives.";

/// Costing prompt template.
/// Replace: {total_cost}, {mandatory_cost}, {optional_cost}, {total_hours},
///          {max_budget}, {error_margin_pct}, {task_lines}
pub const COSTING_PROMPT_TEMPLATE: &str = r#"Analyze the following execution plan for cost optimization:

Execution Plan:
Total Cost: ${total_cost}
Mandatory Cost: ${mandatory_cost}
Optional Cost: ${optional_cost}
Total Hours: {total_hours}

Maximum Budget: {max_budget}
Error Margin: {error_margin_pct}%

Tasks:
{task_lines}

Provide analysis on:
1. Is the plan within budget constraints?
2. Are the hour estimates realistic?
3. Can costs be optimized without compromising quality?
4. Should any optional tasks be reclassified?
5. What's the risk level of this estimate?

If budget exceeds limits by more than 30%, suggest specific reductions.

Return as JSON:
{
    "within_budget": true/false,
    "budget_utilization": percentage,
    "risk_level": "low|medium|high",
    "optimizations": ["list of specific suggestions"],
    "requires_revision": true/false,
    "feedback_for_translator": "specific feedback if revision needed",
    "cost_breakdown": {
        "mandatory": dollar_amount,
        "optional": dollar_amount,
        "recommended_cuts": dollar_amount
    }
}"#;

/// System prompt for the technical validator.
pub const TECHNICAL_SYSTEM: &str =
    "You are a senior technical architect with extensive experience in data \
    science, machine learning, and AI systems. You excel at identifying \
    technical risks and ensuring project feasibility.";

/// Technical validation prompt template.
/// Replace: {job_description}, {skills_required}, {skills},
///          {experience_years}, {specializations}, {plan_lines}
pub const TECHNICAL_PROMPT_TEMPLATE: &str = r#"Validate the technical feasibility of this execution plan:

Job Requirements:
{job_description}
Required Skills: {skills_required}

Freelancer Capabilities:
Skills: {skills}
Experience: {experience_years} years
Specializations: {specializations}

Proposed Plan:
{plan_lines}

Assess:
1. Does the freelancer have the required skills?
2. Are the proposed technologies appropriate?
3. Are there any technical risks or blockers?
4. Is the timeline realistic for the technical complexity?
5. Are there missing technical considerations?

Return as JSON:
{
    "feasible": true/false,
    "confidence_level": "high|medium|low",
    "technical_risks": ["list of risks"],
    "missing_skills": ["skills not covered"],
    "recommendations": ["technical recommendations"],
    "requires_revision": true/false,
    "feedback_for_translator": "feedback if revision needed"
}"#;

/// System prompt for the commercial writer. Plain-text output, no JSON.
pub const WRITER_SYSTEM: &str =
    "You are an expert proposal writer with a proven track record of winning \
    high-value freelance projects. You understand client psychology and know \
    how to position technical capabilities in business terms. \
    Respond with the complete proposal text only, ready for submission.";

/// Writer prompt template.
/// Replace: {job_title}, {job_description}, {budget_range}, {client_name},
///          {total_cost}, {total_hours}, {key_tasks}, {freelancer_name},
///          {experience_years}, {specializations}, {achievements}, {tone},
///          {feedback_block}
pub const WRITER_PROMPT_TEMPLATE: &str = r#"Write a compelling proposal for this job:

Job Details:
Title: {job_title}
Description: {job_description}
Budget: {budget_range}
Client: {client_name}

Execution Plan:
Total Cost: ${total_cost}
Timeline: {total_hours} hours
Key Tasks:
{key_tasks}

Freelancer Profile:
{freelancer_name} - {experience_years} years experience
Specializations: {specializations}
Key Achievements: {achievements}

Template Style: {tone}

{feedback_block}

Write a proposal that:
1. Demonstrates clear understanding of the project
2. Highlights relevant experience and achievements
3. Presents a structured approach with clear deliverables
4. Addresses potential client concerns
5. Includes a compelling call to action
6. Maintains a {tone} tone throughout

Structure the proposal with clear sections and make it scannable.
Include pricing information naturally without making it the focus."#;

/// System prompt for the reviewer.
pub const REVIEWER_SYSTEM: &str =
    "You are an experienced project manager who frequently hires freelancers. \
    You know what makes a proposal stand out and what red flags to avoid. \
    You evaluate proposals with a critical, client-focused eye.";

/// Reviewer prompt template.
/// Replace: {job_title}, {job_description}, {budget_range}, {proposal_text},
///          {total_cost}, {total_hours}
pub const REVIEWER_PROMPT_TEMPLATE: &str = r#"As a client who posted this job, review the following proposal:

Original Job Post:
{job_title}
{job_description}
Budget: {budget_range}

Freelancer's Proposal:
{proposal_text}

Proposed Budget: ${total_cost}
Timeline: {total_hours} hours

Evaluate this proposal on:
1. Does the freelancer understand my requirements?
2. Do they have relevant experience for this project?
3. Is the approach realistic and well-structured?
4. Is the pricing reasonable and justified?
5. Does the proposal inspire confidence?
6. Are there any red flags or concerns?
7. Would I shortlist this freelancer?

Return as JSON:
{
    "overall_score": score_out_of_10,
    "would_shortlist": true/false,
    "strengths": ["list of strengths"],
    "weaknesses": ["list of weaknesses"],
    "red_flags": ["list of concerns"],
    "improvement_suggestions": ["specific suggestions"],
    "estimated_win_probability": percentage,
    "requires_revision": true/false,
    "feedback_for_writer": "specific feedback if revision needed"
}"#;

/// Formats the optional budget range for prompt interpolation.
pub fn budget_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("${lo} - ${hi}"),
        (Some(lo), None) => format!("${lo}+"),
        (None, Some(hi)) => format!("up to ${hi}"),
        (None, None) => "Not specified".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_range_formatting() {
        assert_eq!(budget_range(Some(500.0), Some(1500.0)), "$500 - $1500");
        assert_eq!(budget_range(Some(500.0), None), "$500+");
        assert_eq!(budget_range(None, Some(1500.0)), "up to $1500");
        assert_eq!(budget_range(None, None), "Not specified");
    }

    #[test]
    fn test_templates_carry_their_placeholders() {
        assert!(TRANSLATOR_PROMPT_TEMPLATE.contains("{job_title}"));
        assert!(TRANSLATOR_PROMPT_TEMPLATE.contains("{feedback_block}"));
        assert!(COSTING_PROMPT_TEMPLATE.contains("{error_margin_pct}"));
        assert!(WRITER_PROMPT_TEMPLATE.contains("{tone}"));
        assert!(REVIEWER_PROMPT_TEMPLATE.contains("{proposal_text}"));
    }
}
