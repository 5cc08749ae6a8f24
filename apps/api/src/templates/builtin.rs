//! Built-in proposal templates, written to the template directory at startup
//! when absent so users always have a working set to start from.

use serde_json::{json, Map, Value};

use super::{ProposalTemplate, Tone};

/// All built-in templates, in the order they are seeded.
pub fn all() -> Vec<ProposalTemplate> {
    vec![professional(), technical(), creative()]
}

fn sections(pairs: &[(&str, &str)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (name, content) in pairs {
        map.insert(name.to_string(), json!(content));
    }
    map
}

fn variables(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

pub fn professional() -> ProposalTemplate {
    ProposalTemplate {
        name: "professional".to_string(),
        sections: sections(&[
            (
                "greeting",
                "Dear {client_name},\n\nThank you for posting this {job_title} opportunity.",
            ),
            (
                "understanding",
                "After thoroughly reviewing your requirements, I understand you need \
                 {project_summary}. This aligns perfectly with my expertise in {relevant_skills}.",
            ),
            (
                "approach",
                "My approach will be systematic and results-driven:\n\n\
                 {execution_plan_formatted}\n\nThis methodology ensures quality deliverables \
                 and clear communication throughout the project.",
            ),
            (
                "experience",
                "With {experience_years} years of specialized experience in \
                 {primary_specialization}, I have successfully completed similar projects \
                 including:\n{portfolio_highlights}",
            ),
            (
                "value_proposition",
                "What sets me apart:\n• Proven track record with {achievement_highlight}\n\
                 • Deep expertise in {technical_skills}\n• Commitment to delivering on time \
                 and within budget",
            ),
            (
                "pricing",
                "Based on the project scope, I estimate {total_hours} hours of work at \
                 ${hourly_rate} per hour, totaling ${total_cost}. This includes \
                 {deliverables_summary}.",
            ),
            (
                "timeline",
                "I can begin immediately and deliver the complete solution within \
                 {estimated_timeline}.",
            ),
            (
                "closing",
                "I'm excited about the opportunity to contribute to your project's success. \
                 I'd be happy to discuss any questions you might have.\n\nLooking forward to \
                 hearing from you.\n\nBest regards,\n{freelancer_name}",
            ),
        ]),
        variables: variables(&[
            "client_name",
            "job_title",
            "project_summary",
            "relevant_skills",
            "execution_plan_formatted",
            "experience_years",
            "primary_specialization",
            "portfolio_highlights",
            "achievement_highlight",
            "technical_skills",
            "total_hours",
            "hourly_rate",
            "total_cost",
            "deliverables_summary",
            "estimated_timeline",
            "freelancer_name",
        ]),
        tone: Tone::Professional,
    }
}

pub fn technical() -> ProposalTemplate {
    ProposalTemplate {
        name: "technical".to_string(),
        sections: sections(&[
            ("greeting", "Hello {client_name},"),
            (
                "technical_understanding",
                "I've analyzed your {job_title} requirements and identified the key technical \
                 challenges around {relevant_skills}.",
            ),
            (
                "solution_architecture",
                "Proposed Technical Solution:\n{execution_plan_formatted}\n\n\
                 Technology Stack:\n{technology_stack}",
            ),
            (
                "technical_expertise",
                "Relevant Technical Experience:\n{portfolio_highlights}\n\n\
                 Tools & Technologies: {technical_skills}",
            ),
            (
                "deliverables",
                "Technical Deliverables:\n{technical_deliverables}\n\nAll code will be \
                 well-documented, tested, and production-ready.",
            ),
            (
                "pricing",
                "Development Estimate: {total_hours} hours @ ${hourly_rate}/hour = \
                 ${total_cost}\n\nThis includes development, testing, documentation, and \
                 deployment support.",
            ),
            (
                "closing",
                "I'm confident in delivering a robust, scalable solution that meets your \
                 technical requirements.\n\nReady to start when you are.\n\n{freelancer_name}",
            ),
        ]),
        variables: variables(&[
            "client_name",
            "job_title",
            "relevant_skills",
            "execution_plan_formatted",
            "technology_stack",
            "portfolio_highlights",
            "technical_skills",
            "technical_deliverables",
            "total_hours",
            "hourly_rate",
            "total_cost",
            "freelancer_name",
        ]),
        tone: Tone::Technical,
    }
}

pub fn creative() -> ProposalTemplate {
    ProposalTemplate {
        name: "creative".to_string(),
        sections: sections(&[
            ("greeting", "Hi {client_name}!"),
            (
                "enthusiasm",
                "Your {job_title} project caught my attention immediately - it's exactly the \
                 kind of challenge I love tackling!",
            ),
            (
                "creative_vision",
                "Here's how I envision bringing your project to life:\n\
                 {execution_plan_formatted}\n\nThis approach combines creativity with solid \
                 technical execution.",
            ),
            (
                "unique_perspective",
                "What makes this exciting:\n{deliverables_summary}\n\nI believe in making \
                 data tell compelling stories that drive real business impact.",
            ),
            (
                "portfolio_showcase",
                "Similar magic I've created:\n{portfolio_highlights}",
            ),
            (
                "investment",
                "Investment for this project: {total_hours} hours of focused work at \
                 ${hourly_rate}/hour = ${total_cost}",
            ),
            (
                "excitement",
                "I'm genuinely excited about the possibility of working together on this! \
                 Let's create something awesome!\n\nCheers,\n{freelancer_name}",
            ),
        ]),
        variables: variables(&[
            "client_name",
            "job_title",
            "execution_plan_formatted",
            "deliverables_summary",
            "portfolio_highlights",
            "total_hours",
            "hourly_rate",
            "total_cost",
            "freelancer_name",
        ]),
        tone: Tone::Creative,
    }
}
