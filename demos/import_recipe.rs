//! # Recipe Import Example
//!
//! This example walks the import pipeline through realistic OCR text: a baked
//! recipe with metadata and numbered steps, a cocktail with garnish, a noisy
//! text full of OCR artifacts, a multi-page merge, and the fallback
//! single-pass parser.

use recipe_import::artifact_normalizer::normalize_artifacts;
use recipe_import::quick_parser::quick_parse;
use recipe_import::{RecipeImporter, SourceText};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("📷 Recipe Import Pipeline Example");
    println!("==================================\n");

    let importer = RecipeImporter::new();

    // Example 1: a full recipe page
    println!("🍰 Example 1: Full Recipe Page");
    println!("------------------------------");

    let cake_text = "\
Lemon Drizzle Cake
A Bright Spring Classic
Serves 8
Prep time: 20 min
Cook time: 40 min

Ingredients:
2 cups flour
1 cup sugar
1 tsp vanilla extract
3 eggs
1/2 cup butter, softened

Directions:
1. Preheat oven to 350.
2. Cream the butter and sugar until fluffy.
3. Fold in the flour and bake until golden.";

    let result = importer.import(cake_text, &[]);
    println!(
        "Title: {} (confidence {:.2})",
        result.title, result.title_confidence
    );
    println!(
        "Course: {} (confidence {:.2})",
        result.course, result.course_confidence
    );
    println!("Serves: {}, total time: {}", result.serves, result.total_time);
    println!("Ingredients:");
    for ingredient in &result.ingredients {
        println!("  - {ingredient}");
    }
    println!("Directions:");
    for (i, direction) in result.directions.iter().enumerate() {
        println!("  {}. {}", i + 1, direction);
    }

    println!("\n");

    // Example 2: cocktail with garnish
    println!("🍸 Example 2: Cocktail with Garnish");
    println!("-----------------------------------");

    let cocktail_text = "\
Gin Gimlet
2 parts gin
1 part lime juice
Shake with ice and strain into a chilled glass.
Garnish: lime wheel";

    let cocktail = importer.import(cocktail_text, &[]);
    println!("Title: {}", cocktail.title);
    println!("Course: {}", cocktail.course);
    for ingredient in &cocktail.ingredients {
        println!("  - {ingredient}");
    }
    println!("Garnishes: {:?}", cocktail.garnishes);

    println!("\n");

    // Example 3: OCR artifact repair
    println!("🔧 Example 3: OCR Artifact Repair");
    println!("---------------------------------");

    let noisy = "V2 cup sugar\n2cups flour\nl tsp salt";
    println!("Before: {noisy:?}");
    println!("After:  {:?}", normalize_artifacts(noisy));

    println!("\n");

    // Example 4: merging multiple photographed pages
    println!("📄 Example 4: Multi-Page Merge");
    println!("------------------------------");

    let sources = vec![
        SourceText::new("Beef Stew\nIngredients:\n2 lb beef\n1 onion"),
        SourceText::new("Ingredients:\n2 carrots\nDirections:\nBrown the beef in batches."),
        SourceText::new("Directions:\nSimmer for two hours until tender."),
    ];
    let merged = importer.import_sources(&sources)?;
    println!("Merged {} ingredients:", merged.ingredients.len());
    for ingredient in &merged.ingredients {
        println!("  - {ingredient}");
    }
    println!("Merged {} directions.", merged.directions.len());

    println!("\n");

    // Example 5: error on zero usable sources
    println!("🚨 Example 5: Error Handling");
    println!("----------------------------");

    match importer.import_sources(&[]) {
        Ok(_) => println!("Unexpected success with no sources"),
        Err(e) => println!("Expected error with no sources: {e}"),
    }

    println!("\n");

    // Example 6: fallback single-pass parser and JSON output
    println!("⚡ Example 6: Fallback Parser + JSON");
    println!("------------------------------------");

    let quick = quick_parse("Beef Stew\nIngredients:\n2 lb beef\nDirections:\nBrown the beef.");
    println!("{}", serde_json::to_string_pretty(&quick)?);

    println!("\n✨ Recipe import examples completed!");

    Ok(())
}
