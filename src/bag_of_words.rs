//! Bag of words: token -> document positions, built on `ChainHash` with
//! the `AppendFirst` policy.

use crate::chain_hash::ChainHash;
use crate::config::ChainHashConfig;
use crate::policy::AppendFirst;
use core::fmt;
use log::debug;

/// Initial bucket count of the index built by [`bag_of_words`].
pub const BAG_OF_WORDS_CAPACITY: usize = 13;

/// Inverted index from normalized token to the documents containing it.
pub type DocumentIndex = ChainHash<String, Vec<usize>, AppendFirst>;

/// Split `text` on whitespace, keep only alphanumeric characters of each
/// piece, lowercase, and drop pieces left empty.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Index every token of every document by document position.
///
/// A token repeated inside one document records that position once per
/// occurrence.
pub fn bag_of_words<D>(documents: &[D]) -> DocumentIndex
where
    D: AsRef<str>,
{
    bag_of_words_with_capacity(documents, BAG_OF_WORDS_CAPACITY)
}

pub fn bag_of_words_with_capacity<D>(documents: &[D], capacity: usize) -> DocumentIndex
where
    D: AsRef<str>,
{
    let mut index = DocumentIndex::with_config(ChainHashConfig::new().initial_capacity(capacity));
    let mut tokens_seen = 0usize;
    for (i, doc) in documents.iter().enumerate() {
        for token in tokenize(doc.as_ref()) {
            index.set(token, vec![i]);
            tokens_seen += 1;
        }
    }
    debug!(
        "bag_of_words: {} documents, {} tokens, {} distinct in {} buckets",
        documents.len(),
        tokens_seen,
        index.len(),
        index.bucket_count()
    );
    index
}

/// Renders a [`DocumentIndex`] bucket by bucket as a JSON object:
///
/// ```text
/// {
///  "casa": [0, 1],
///  "grande": [0]
/// }
/// ```
///
/// Entries are comma-separated with no trailing comma. Tokens produced by
/// [`tokenize`] never need escaping; other keys are escaped through `Debug`.
pub struct BagOfWordsDisplay<'a>(pub &'a DocumentIndex);

impl fmt::Display for BagOfWordsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        let mut first = true;
        for (token, docs) in self.0.iter() {
            if !first {
                writeln!(f, ",")?;
            }
            first = false;
            write!(f, " {:?}: [", token)?;
            for (j, d) in docs.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", d)?;
            }
            write!(f, "]")?;
        }
        if !first {
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
