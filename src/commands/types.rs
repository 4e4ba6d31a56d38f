//! Types command - list test-type codes and their labels

use colored::Colorize;
use recommender::test_types;

pub fn execute(json: bool) -> anyhow::Result<()> {
    if json {
        let map: serde_json::Map<String, serde_json::Value> = test_types::all()
            .iter()
            .map(|(code, label)| (code.to_string(), serde_json::Value::from(*label)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    println!("{}", "Test types".bold());
    for (code, label) in test_types::all() {
        println!("  {}  {}", code.cyan(), label);
    }
    Ok(())
}
