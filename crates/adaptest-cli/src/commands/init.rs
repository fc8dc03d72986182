//! The `adaptest init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create adaptest.toml
    if std::path::Path::new("adaptest.toml").exists() {
        println!("adaptest.toml already exists, skipping.");
    } else {
        std::fs::write("adaptest.toml", SAMPLE_CONFIG)?;
        println!("Created adaptest.toml");
    }

    // Create starter question bank
    std::fs::create_dir_all("banks")?;
    let starter_path = std::path::Path::new("banks/starter.toml");
    if starter_path.exists() {
        println!("banks/starter.toml already exists, skipping.");
    } else {
        std::fs::write(starter_path, STARTER_BANK)?;
        println!("Created banks/starter.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your questions to banks/starter.toml");
    println!("  2. Run: adaptest validate --bank banks/starter.toml");
    println!("  3. Run: adaptest simulate --bank banks/starter.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# adaptest configuration

bank = "banks"
output_dir = "./adaptest-results"
sim_accuracy = 0.7
summaries = true
"#;

const STARTER_BANK: &str = r#"[bank]
id = "starter"
name = "Starter Bank"
description = "A small bank to get going; add questions at every tier"

[[questions]]
id = "starter-001"
prompt = "How many days are there in a leap year?"
options = ["364", "365", "366", "367"]
correct_index = 2
explanation = "A leap year adds February 29th, for 366 days."
tags = ["calendar"]
tier = "very_easy"

[[questions]]
id = "starter-002"
prompt = "Which gas makes up most of Earth's atmosphere?"
options = ["Oxygen", "Nitrogen", "Carbon dioxide"]
correct_index = 1
explanation = "Nitrogen is roughly 78% of the atmosphere."
tags = ["science"]
tier = "easy"

[[questions]]
id = "starter-003"
prompt = "What is the smallest prime number greater than 90?"
options = ["91", "93", "97", "99"]
correct_index = 2
explanation = "91 = 7x13 and 93 = 3x31; 97 has no divisors."
tags = ["math"]
tier = "moderate"

[[questions]]
id = "starter-004"
prompt = "Which sorting algorithm has the best worst-case time complexity?"
options = ["Quicksort", "Bubble sort", "Merge sort", "Insertion sort"]
correct_index = 2
explanation = "Merge sort is O(n log n) in the worst case."
tags = ["computing"]
tier = "difficult"
"#;
