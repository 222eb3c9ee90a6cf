//! Bag of words demo
//!
//! Tokenizes the given documents (or a built-in sample), indexes each token
//! by the positions of the documents containing it, and prints the index.
//!
//! ```text
//! cargo run --example bag_of_words -- "La casa es grande" "La casa es bonita"
//! RUST_LOG=debug cargo run --example bag_of_words -- --capacity 2
//! ```

use chain_hash::bag_of_words::{bag_of_words_with_capacity, BAG_OF_WORDS_CAPACITY};
use chain_hash::BagOfWordsDisplay;
use clap::Parser;

const SAMPLE_DOCUMENTS: [&str; 4] = [
    "La casa es grande",
    "El gato está en la casa",
    "La casa es bonita y grande",
    "El sol brilla sobre la casa",
];

#[derive(Parser, Debug)]
struct Args {
    /// Initial bucket count of the index.
    #[arg(short = 'c', long = "capacity", default_value_t = BAG_OF_WORDS_CAPACITY)]
    capacity: usize,

    /// Documents to index. Defaults to a four-sentence sample.
    documents: Vec<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let documents: Vec<String> = if args.documents.is_empty() {
        SAMPLE_DOCUMENTS.iter().map(|d| d.to_string()).collect()
    } else {
        args.documents
    };

    println!("Input documents:");
    for (i, doc) in documents.iter().enumerate() {
        println!("[{}] {:?}", i, doc);
    }
    println!();

    let index = bag_of_words_with_capacity(&documents, args.capacity);
    println!(
        "Bag of words (token -> [documents]), {} tokens in {} buckets:",
        index.len(),
        index.bucket_count()
    );
    println!("{}", BagOfWordsDisplay(&index));
}
