use tokenizers::{
    normalizers::bert::BertNormalizer, pre_tokenizers::bert::BertPreTokenizer, NormalizedString,
    Normalizer, OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer,
};

/// Splits raw documents into word tokens
pub trait Tokenize {
    /// Tokenize a single document
    fn tokenize(&self, text: &str) -> anyhow::Result<Vec<String>>;

    /// Tokenize a list of documents, preserving their order
    fn tokenize_all<S: AsRef<str>>(&self, texts: &[S]) -> anyhow::Result<Vec<Vec<String>>> {
        texts.iter().map(|text| self.tokenize(text.as_ref())).collect()
    }
}

/// A word-level tokenizer that splits on whitespace and punctuation
pub struct WordTokenizer {
    normalizer: BertNormalizer,
    pre_tokenizer: BertPreTokenizer,
}

impl WordTokenizer {
    /// Create a new tokenizer, optionally lowercasing every token
    pub fn new(lowercase: bool) -> Self {
        Self {
            normalizer: BertNormalizer::new(true, true, None, lowercase),
            pre_tokenizer: BertPreTokenizer,
        }
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Tokenize for WordTokenizer {
    fn tokenize(&self, text: &str) -> anyhow::Result<Vec<String>> {
        let mut normalized = NormalizedString::from(text);
        self.normalizer
            .normalize(&mut normalized)
            .map_err(|e| anyhow!("Unable to normalize text: {}", e))?;

        let mut pre_tokenized = PreTokenizedString::from(normalized);
        self.pre_tokenizer
            .pre_tokenize(&mut pre_tokenized)
            .map_err(|e| anyhow!("Unable to split text: {}", e))?;

        let tokens = pre_tokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .filter(|(token, _, _)| !token.is_empty())
            .map(|(token, _, _)| token.to_string())
            .collect();

        Ok(tokens)
    }
}
