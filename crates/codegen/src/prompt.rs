//! Instruction template sent to the model

use componentai_core::FrameworkChoice;

/// Options that vary the instruction template.
///
/// The default leaves the template untouched, so the model is told to return
/// code only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromptOptions {
    /// Ask for explanatory comments in the generated code
    pub include_comments: bool,
}

/// Build the full instruction for a component description.
///
/// `description` is embedded verbatim; the caller has already rejected empty
/// descriptions.
pub fn build_prompt(description: &str, framework: FrameworkChoice, options: PromptOptions) -> String {
    let comments = if options.include_comments {
        "- Add brief comments in the code where they help a reader, but no prose outside the code block."
    } else {
        "- Do NOT include explanations, text, comments, or anything else besides the code."
    };

    format!(
        "You are an experienced programmer with expertise in web development and UI/UX design. \
You create modern, animated, and fully responsive UI components. You are highly skilled in \
HTML, CSS, Tailwind CSS, Bootstrap, JavaScript, React, Next.js, Vue.js, Angular, and more.

Now, generate a UI component for: {description}
Framework to use: {framework}

Requirements:
- The code must be clean, well-structured, and easy to understand.
- Optimize for SEO where applicable.
- Focus on creating a modern, animated, and responsive UI design.
- Include high-quality hover effects, shadows, animations, colors, and typography.
- Return ONLY the code, formatted properly in **Markdown fenced code blocks**.
{comments}
- And give the whole code in a single HTML file.
",
        description = description.trim(),
        framework = framework.value(),
        comments = comments,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_description_and_framework_value() {
        let prompt = build_prompt(
            "a pricing card with three tiers",
            FrameworkChoice::HtmlTailwind,
            PromptOptions::default(),
        );
        assert!(prompt.contains("generate a UI component for: a pricing card with three tiers\n"));
        assert!(prompt.contains("Framework to use: html-tailwind\n"));
        assert!(prompt.contains("single HTML file"));
        assert!(prompt.contains("fenced code blocks"));
    }

    #[test]
    fn test_comment_line_follows_option() {
        let with = build_prompt("x", FrameworkChoice::HtmlCss, PromptOptions { include_comments: true });
        let without = build_prompt("x", FrameworkChoice::HtmlCss, PromptOptions { include_comments: false });
        assert!(with.contains("Add brief comments"));
        assert!(!with.contains("Do NOT include"));
        assert!(without.contains("Do NOT include explanations, text, comments"));
    }

    #[test]
    fn test_default_options_keep_code_only_line() {
        let prompt = build_prompt("x", FrameworkChoice::HtmlCss, PromptOptions::default());
        assert!(prompt.contains(
            "- Do NOT include explanations, text, comments, or anything else besides the code.\n"
        ));
        assert!(!prompt.contains("Add brief comments"));
    }
}
