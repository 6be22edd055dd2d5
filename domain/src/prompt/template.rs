//! Prompt templates for proposing, voting and advancing the topic

use crate::participant::ParticipantProfile;

/// Templates for generating prompts at each stage of a round
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt asking a participant for a proposal on `topic`
    pub fn proposal(profile: &ParticipantProfile, memories: &[String], topic: &str) -> String {
        format!(
            r#"{}
There are some relevant memories:
{}

Based on your knowledge and experience, propose an idea for the topic: {}
Respond in 3-4 sentences."#,
            profile.persona(),
            Self::memory_block(memories),
            topic
        )
    }

    /// Prompt asking a participant to pick one of `options`
    pub fn vote(profile: &ParticipantProfile, memories: &[String], options: &[String]) -> String {
        let mut prompt = format!(
            r#"{}
There are some relevant memories:
{}

Given these proposals:
"#,
            profile.persona(),
            Self::memory_block(memories)
        );

        prompt.push_str(&Self::numbered(options));

        prompt.push_str(
            r#"
Which proposal do you vote for? Answer with the number of the proposal first, then explain your choice in 1-2 short sentences in the following paragraph."#,
        );

        prompt
    }

    /// Prompt turning a winning proposal into the next round's topic
    pub fn next_topic(winning_proposal: &str, environment: &str) -> String {
        format!(
            r#"Based on the winning proposal: '{}', generate a new topic for the next round of discussion about this environment: {}
Respond with only the new topic."#,
            winning_proposal, environment
        )
    }

    /// Recall query used when voting on `options`
    pub fn vote_recall_query(options: &[String]) -> String {
        options.join("; ")
    }

    /// Numbered option list, one per line, 1-based
    pub fn numbered(options: &[String]) -> String {
        options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{}. {}\n", i + 1, option))
            .collect()
    }

    fn memory_block(memories: &[String]) -> String {
        if memories.is_empty() {
            "(none)".to_string()
        } else {
            memories.join("\n")
        }
    }
}

/// Memory entries written after proposing and voting
pub struct MemoryEntry;

impl MemoryEntry {
    pub fn proposed(topic: &str, proposal: &str) -> String {
        format!("I proposed an idea about '{}': {}", topic, proposal)
    }

    pub fn voted(choice: usize, options: &[String]) -> String {
        format!(
            "I voted for proposal {}. The proposals were: {}",
            choice,
            options.join("; ")
        )
    }

    pub fn vote_fallback(choice: usize, options: &[String]) -> String {
        format!(
            "I failed to vote clearly, so proposal {} was chosen for me at random. The proposals were: {}",
            choice,
            options.join("; ")
        )
    }
}
