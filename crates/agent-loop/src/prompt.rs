//! System instruction assembly: behavior rules, the step output format, the
//! tool list rendered from the registry, and two worked examples.

use agent_core::ToolRegistry;

const RULES: &str = r#"
Rules:
- Follow the Output JSON Format.
- Always perform one step at a time and wait for next input
- Carefully analyse the user query
- For coding tasks, first understand what files exist in the current directory
- When creating a file, make sure to use the appropriate extension and syntax for the language
- When working with a frontend project, check package.json before installing packages and starting the project
- If the user wants to edit a file, first read it, then modify it, then write it back
- Be concise in your explanations but thorough in your actions
- Prefer running commands over manually creating complex file structures
- When creating project files, always ensure they are created within the project directory
- When working with files, use relative paths starting at the project root
- DO NOT create a nested directory with the project name inside the project
- Example: For a React component in a project named "my-project", use "src/components/Component.jsx" NOT "my-project/src/components/Component.jsx"
"#;

const OUTPUT_FORMAT: &str = r#"
Output JSON Format:
{
    "step": "string",
    "content": "string",
    "function": "The name of function if the step is action",
    "input": "The input parameter for the function"
}
"#;

const EXAMPLES: &str = r#"
Example:
User Query: Create a python file for adding two numbers then displaying those two numbers.
Output: {"step": "plan", "content": "The user wants a python file containing code that adds two numbers"}
Output: {"step": "plan", "content": "From the available tools I should use write_file to create the file"}
Output: {"step": "action", "function": "write_file", "input": {"file_path": "add_numbers.py", "content": "a = float(input('Enter first number: '))\nb = float(input('Enter second number: '))\nprint(f'{a} + {b} = {a + b}')"}}
Output: {"step": "observe", "content": "Content written to add_numbers.py"}
Output: {"step": "output", "content": "The file has been created successfully"}

Example 2:
User Query: Setup the complete react setup for me and run it after setting things up
Output: {"step": "plan", "content": "The user wants to create a Vite plus React app and execute it"}
Output: {"step": "plan", "content": "I should scaffold the Vite project and install everything it needs to run"}
Output: {"step": "plan", "content": "Create a SEPARATE folder for this project and work in that folder for all future prompts about this app"}
Output: {"step": "action", "function": "create_project", "input": {"project_type": "vite-react", "project_name": "my-react-app"}}
Output: {"step": "observe", "content": "The command creates the app, then we move to the next step"}
Output: {"step": "action", "function": "run_project", "input": {"project_dir": "my-react-app"}}
Output: {"step": "observe", "content": "The project is running in a new terminal window"}
Output: {"step": "output", "content": "The Vite+React app is successfully running"}
"#;

/// Render the full system instruction for the given tool set.
pub fn build_system_prompt(registry: &ToolRegistry) -> String {
    let os = std::env::consts::OS;
    let cwd = std::env::current_dir()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| ".".to_string());

    let mut prompt = String::from(
        "You are a helpful terminal-based AI Assistant specialized in coding, \
         problem-solving, and creating, developing and maintaining full-stack projects.\n\
         You are capable of working in any programming language and on any framework.\n\
         You are capable of creating folders and file structures.\n\
         You work in start, plan, action, observe mode.\n\
         For the given user query and the given available tools, plan the step-by-step \
         execution, select the relevant tool, perform an action to call the tool, wait \
         for the observation and resolve the user query based on it.\n",
    );

    prompt.push_str(RULES);
    prompt.push_str(&format!(
        "- Always keep in mind that you are working on {os}\n\
         - The current working directory is {cwd}\n"
    ));
    prompt.push_str(OUTPUT_FORMAT);

    prompt.push_str("\nAvailable Tools:\n");
    for schema in registry.list_tools() {
        prompt.push_str(&format!("- {}: {}\n", schema.name, schema.description));
    }

    prompt.push_str(EXAMPLES);
    prompt
}
