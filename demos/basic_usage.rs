// demos/basic_usage.rs
//! Basic usage example of the rule AST engine

use rule_ast_engine::{combine, compile, printer, Evaluator, Record, RuleEngine};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Rule AST Engine - Basic Usage ===\n");

    // Example 1: Compile a single rule
    let rule1 = compile("( age > 30 AND department = 'Sales' )").expect("Failed to compile rule 1");
    println!("AST for Rule 1:");
    print!("{}", printer::render(&rule1));

    // Example 2: Combine rules
    let rule2 = compile("( salary > 50000 OR experience > 5 )").expect("Failed to compile rule 2");
    let combined = combine(vec![rule1, rule2]).expect("Failed to combine rules");
    println!("\nAST for Combined Rule:");
    print!("{}", printer::render(&combined));
    println!("\nAs rule text: {}", combined);

    // Example 3: Evaluate
    let user = Record::new()
        .with_field("age", 35)
        .with_field("department", "Sales")
        .with_field("salary", 60000)
        .with_field("experience", 3);

    let result = Evaluator::new().evaluate(&combined, &user);
    println!("\nEvaluation result: {}", result);

    // Example 4: Same flow through the engine facade, record read from JSON
    let engine = RuleEngine::from_rules([
        "( age > 30 AND department = 'Sales' )",
        "( salary > 50000 OR experience > 5 )",
    ])
    .expect("Failed to build engine");

    let junior_json = r#"{"age": 24, "department": "Sales", "salary": 40000, "experience": 1}"#;
    let junior = Record::from_json(junior_json).expect("Invalid record JSON");
    println!("Junior employee matches: {}", engine.evaluate(&junior));

    // Example 5: Malformed literal, reported as a WARN log and treated as false
    let bad = compile("age > thirty").expect("Failed to compile");
    println!("Malformed literal result: {}", Evaluator::new().evaluate(&bad, &user));
}
