//! Canned prompts offered to MCP clients.

pub const EXPLORE_PROJECTS: &str = "explore_cursor_projects";
pub const ANALYZE_CHAT_DATA: &str = "analyze_chat_data";

/// A static prompt template.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub text: &'static str,
}

pub const PROMPTS: &[PromptTemplate] = &[
    PromptTemplate {
        name: EXPLORE_PROJECTS,
        description: "Explore the Cursor projects available on this machine",
        text: "I'd like to explore the Cursor projects stored on this machine.\n\n\
               1. Read cursor://projects to list every project and its database.\n\
               2. Read cursor://projects/detailed for the workspace folder each project was opened on.\n\
               3. For an interesting project, read cursor://projects/{project_name}/chat to see its AI chat history.\n\
               4. Read cursor://projects/{project_name}/composers to list its composer sessions, \
               then cursor://composers/{composer_id} for the details of one session.\n\n\
               Use the query_table tool with query_type \"search_keys\" to find other stored keys, \
               and refresh_databases if a project seems to be missing.",
    },
    PromptTemplate {
        name: ANALYZE_CHAT_DATA,
        description: "Analyze the AI chat history of a Cursor project",
        text: "Please analyze the AI chat history of one of my Cursor projects.\n\n\
               First read cursor://projects to pick a project, then read \
               cursor://projects/{project_name}/chat.\n\n\
               Summarize:\n\
               - The main topics and problems discussed\n\
               - Recurring questions or patterns in how the assistant was used\n\
               - Code changes or decisions that came out of the conversations\n\
               - Open threads that look unresolved\n\n\
               If the chat data is missing, try query_table on ItemTable with query_type \
               \"search_keys\" and key \"aichat\" to locate it.",
    },
];

/// Look up a prompt by name.
pub fn find(name: &str) -> Option<&'static PromptTemplate> {
    PROMPTS.iter().find(|p| p.name == name)
}
