use snakequery::{Client, QueryOptions, SchemaBuilder};

/// Example program that queries a remote URL with a response schema.
/// Configure authentication via `SNAKE_QUERY_API_KEY` or a
/// `.snakequeryrc` file.
fn main() {
    let client = match Client::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let source = "https://api.escuelajs.co/api/v1/products";

    let product_schema = SchemaBuilder::array_of(
        SchemaBuilder::create()
            .object()
            .add_string_property("productTitle")
            .add_property("price", SchemaBuilder::create().number().minimum(0).build())
            .add_string_property("categoryName")
            .required(["productTitle", "price", "categoryName"])
            .build(),
    )
    .build();

    println!("Query: find products under $100");
    println!("Data source: {source}");

    match client.query(
        "Show me products that cost less than $100, include title, price and category name",
        QueryOptions::with_url(source).response_schema(product_schema),
    ) {
        Ok(result) => {
            println!("Token usage: {}", result["usageCount"]);
            println!("Response: {}", result["response"]);
            if let Some(items) = result["response"].as_array() {
                println!("Found {} products under $100", items.len());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            match e.status() {
                Some(401) => eprintln!("Tip: check your API key"),
                Some(503) => eprintln!("Tip: the URL might be unreachable"),
                _ => {}
            }
            std::process::exit(1);
        }
    }
}
