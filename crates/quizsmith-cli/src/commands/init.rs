//! The `quizsmith init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizsmith.toml
    if std::path::Path::new("quizsmith.toml").exists() {
        println!("quizsmith.toml already exists, skipping.");
    } else {
        std::fs::write("quizsmith.toml", SAMPLE_CONFIG)?;
        println!("Created quizsmith.toml");
    }

    // Create sample assessment and answers
    std::fs::create_dir_all("assessments")?;
    for (path, content) in [
        ("assessments/lists.toml", LISTS_ASSESSMENT),
        ("assessments/lists-answers.toml", LISTS_ANSWERS),
    ] {
        if std::path::Path::new(path).exists() {
            println!("{path} already exists, skipping.");
        } else {
            std::fs::write(path, content)?;
            println!("Created {path}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Run: quizsmith validate --assessment assessments/lists.toml");
    println!(
        "  2. Run: quizsmith grade --assessment assessments/lists.toml --answers assessments/lists-answers.toml"
    );

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizsmith configuration

output_dir = "./quizsmith-results"
default_format = "text"
"#;

const LISTS_ASSESSMENT: &str = r#"[assessment]
title = "Lists Fundamentals Assessment"
description = "Test your knowledge of Python lists with questions covering basic operations."
time_limit = 15

[[questions]]
id = "q1"
text = "What is the output of `my_list = [1, 2, 3]; print(my_list[1])`?"
kind = "multiple_choice"
options = ["1", "2", "3", "IndexError"]
correct_answer = "2"
explanation = "List indexing starts at 0, so index 1 refers to the second element."
points = 1
difficulty = "beginner"

[[questions]]
id = "q2"
text = """
Complete this code to add 'apple' to the end of the list:
fruits = ['banana', 'orange']
# Your code here
"""
kind = "code_completion"
correct_answer = "fruits.append('apple')"
explanation = "The append() method adds an element to the end of a list."
points = 2
difficulty = "beginner"

[[questions]]
id = "q3"
text = "What method would you use to remove the last element from a list?"
kind = "short_answer"
correct_answer = "pop"
explanation = "The pop() method removes and returns the last element from a list."
points = 1
difficulty = "beginner"
"#;

const LISTS_ANSWERS: &str = r#"[answers]
q1 = "2"
q2 = "fruits.append( 'apple' )"
q3 = "Pop"
"#;
