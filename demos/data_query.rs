use serde_json::json;
use snakequery::{Client, QueryOptions, SchemaBuilder};

/// Example program that queries an inline product list with a
/// response schema. Configure authentication via `SNAKE_QUERY_API_KEY`
/// or a `.snakequeryrc` file.
fn main() {
    let client = match Client::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let products = json!([
        { "name": "iPhone 14", "price": 999, "category": "electronics", "brand": "Apple", "stock": 50 },
        { "name": "Samsung TV", "price": 1299, "category": "electronics", "brand": "Samsung", "stock": 25 },
        { "name": "Nike Shoes", "price": 129, "category": "fashion", "brand": "Nike", "stock": 100 },
        { "name": "Adidas Jacket", "price": 89, "category": "fashion", "brand": "Adidas", "stock": 75 },
        { "name": "MacBook Pro", "price": 2399, "category": "electronics", "brand": "Apple", "stock": 15 }
    ]);

    let product_schema = SchemaBuilder::array_of(
        SchemaBuilder::create()
            .object()
            .add_string_property("productName")
            .add_property("price", SchemaBuilder::create().number().minimum(0).build())
            .add_string_property("brand")
            .add_string_property("category")
            .required(["productName", "price", "brand"])
            .build(),
    )
    .build();

    println!("Query: find products under $500");

    match client.query(
        "Find all products that cost less than $500 and show their names, prices, brands and categories",
        QueryOptions::with_data(products).response_schema(product_schema),
    ) {
        Ok(result) => {
            println!("Token usage: {}", result["usageCount"]);
            println!("Response: {}", result["response"]);
            if let Some(items) = result["response"].as_array() {
                println!("Found {} products under $500", items.len());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if e.status() == Some(401) {
                eprintln!("Tip: check your API key");
            }
            std::process::exit(1);
        }
    }
}
