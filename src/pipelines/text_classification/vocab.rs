use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The sentinel token that owns index 0
pub static UNK_TOKEN: &str = "<<UNK>>";

/// The index reserved for the unknown sentinel, also used for padding
pub const UNK_TOKEN_ID: usize = 0;

/// A mapping from tokens to embedding indexes, built from a training corpus
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Tokens by index, with the sentinel at position 0
    idx2word: Vec<String>,

    /// Indexes by token
    #[serde(skip)]
    word2idx: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from tokenized training sentences.
    ///
    /// Tokens that occur exactly once are treated as rare and left out. The remaining tokens are
    /// indexed from 1 in the order they are first seen, and the sentinel takes index 0.
    pub fn build<S, T>(sentences: &[S]) -> Self
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut discovered: Vec<&str> = Vec::new();

        for sentence in sentences {
            for token in sentence.as_ref() {
                let token = token.as_ref();
                let count = counts.entry(token).or_insert_with(|| {
                    discovered.push(token);
                    0
                });
                *count += 1;
            }
        }

        let mut idx2word = Vec::with_capacity(discovered.len() + 1);
        idx2word.push(UNK_TOKEN.to_string());

        idx2word.extend(
            discovered
                .into_iter()
                .filter(|token| counts[token] > 1 && *token != UNK_TOKEN)
                .map(str::to_string),
        );

        Self::from_tokens(idx2word)
    }

    fn from_tokens(idx2word: Vec<String>) -> Self {
        let word2idx = idx2word
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.clone(), idx))
            .collect();

        Self { idx2word, word2idx }
    }

    /// The number of entries, including the sentinel. This is the embedding table size.
    pub fn len(&self) -> usize {
        self.idx2word.len()
    }

    /// A vocabulary always holds the sentinel, so it is never empty
    pub fn is_empty(&self) -> bool {
        self.idx2word.is_empty()
    }

    /// Look up the index of a token
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.word2idx.get(token).copied()
    }

    /// Look up the token at an index
    pub fn token(&self, index: usize) -> Option<&str> {
        self.idx2word.get(index).map(String::as_str)
    }

    /// Iterate over `(token, index)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.idx2word
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.as_str(), idx))
    }

    /// Encode one tokenized sentence. Tokens missing from the vocabulary map to the sentinel.
    pub fn encode<T: AsRef<str>>(&self, sentence: &[T]) -> Vec<usize> {
        sentence
            .iter()
            .map(|token| self.index_of(token.as_ref()).unwrap_or(UNK_TOKEN_ID))
            .collect()
    }

    /// Encode a tokenized corpus, preserving sentence and token order
    pub fn encode_all<S, T>(&self, sentences: &[S]) -> Vec<Vec<usize>>
    where
        S: AsRef<[T]>,
        T: AsRef<str>,
    {
        sentences
            .iter()
            .map(|sentence| self.encode(sentence.as_ref()))
            .collect()
    }

    /// Save the vocabulary as JSON
    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| anyhow!("Unable to create vocabulary file {}: {}", path, e))?;

        serde_json::to_writer(file, self)?;

        Ok(())
    }

    /// Load a vocabulary previously written with [`Vocabulary::save`]
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| anyhow!("Unable to open vocabulary file {}: {}", path, e))?;

        let stored: Self = serde_json::from_reader(std::io::BufReader::new(file))?;

        if stored.token(UNK_TOKEN_ID) != Some(UNK_TOKEN) {
            return Err(anyhow!("Vocabulary file {} does not start with {}", path, UNK_TOKEN));
        }

        let vocab = Self::from_tokens(stored.idx2word);

        // Every token needs its own index
        if vocab.word2idx.len() != vocab.idx2word.len() {
            return Err(anyhow!("Vocabulary file {} contains duplicate tokens", path));
        }

        Ok(vocab)
    }
}

/// Build a vocabulary from the training sentences only and encode both splits with it
pub fn tok2seq<S, T>(
    train: &[S],
    test: &[S],
) -> (Vec<Vec<usize>>, Vec<Vec<usize>>, Vocabulary)
where
    S: AsRef<[T]>,
    T: AsRef<str>,
{
    let vocab = Vocabulary::build(train);

    let train_seq = vocab.encode_all(train);
    let test_seq = vocab.encode_all(test);

    (train_seq, test_seq, vocab)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn corpus(sentences: &[&[&str]]) -> Vec<Vec<String>> {
        sentences
            .iter()
            .map(|s| s.iter().map(|t| t.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_indexes_repeated_tokens_in_discovery_order() {
        let train = corpus(&[&["a", "b", "a"], &["b", "c"]]);

        let vocab = Vocabulary::build(&train);

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of(UNK_TOKEN), Some(0));
        assert_eq!(vocab.index_of("a"), Some(1));
        assert_eq!(vocab.index_of("b"), Some(2));
        assert_eq!(vocab.index_of("c"), None);

        assert_eq!(vocab.encode(&train[0]), vec![1, 2, 1]);
        assert_eq!(vocab.encode(&train[1]), vec![2, 0]);
    }

    #[test]
    fn test_unseen_tokens_encode_as_unknown() {
        let train = corpus(&[&["a", "b", "a"], &["b", "c"]]);
        let test = corpus(&[&["d"], &["a", "d", "c"]]);

        let (_, test_seq, vocab) = tok2seq(&train, &test);

        assert_eq!(test_seq, vec![vec![0], vec![1, 0, 0]]);
        assert_eq!(vocab.index_of("d"), None);
    }

    #[test]
    fn test_all_rare_tokens_leave_only_the_sentinel() {
        let train = corpus(&[&["x", "y", "z"]]);

        let (train_seq, _, vocab) = tok2seq(&train, &[]);

        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.token(0), Some(UNK_TOKEN));
        assert_eq!(train_seq, vec![vec![0, 0, 0]]);
    }

    #[test]
    fn test_empty_corpus() {
        let train: Vec<Vec<String>> = Vec::new();

        let vocab = Vocabulary::build(&train);

        assert_eq!(vocab.len(), 1);
        assert_eq!(vocab.encode(&["any", "thing"]), vec![0, 0]);
    }

    #[test]
    fn test_test_split_never_contributes() {
        let train = corpus(&[&["a", "a"]]);
        let test = corpus(&[&["b", "b", "b"]]);

        let (_, test_seq, vocab) = tok2seq(&train, &test);

        assert_eq!(vocab.len(), 2);
        assert_eq!(test_seq, vec![vec![0, 0, 0]]);
    }

    #[test]
    fn test_sentinel_is_the_only_zero() {
        let train = corpus(&[
            &["the", "cat", "sat", UNK_TOKEN],
            &["the", "dog", "sat", UNK_TOKEN],
            &["a", "cat", "ran"],
        ]);

        let vocab = Vocabulary::build(&train);

        let zeros: Vec<_> = vocab.iter().filter(|(_, idx)| *idx == 0).collect();
        assert_eq!(zeros, vec![(UNK_TOKEN, 0)]);

        let mut indexes: Vec<_> = ["the", "cat", "sat"]
            .iter()
            .map(|t| vocab.index_of(t).unwrap())
            .collect();
        indexes.sort();
        assert_eq!(indexes, vec![1, 2, 3]);

        for rare in ["dog", "a", "ran"] {
            assert_eq!(vocab.index_of(rare), None);
        }
    }

    #[test]
    fn test_encoding_preserves_length_and_is_repeatable() {
        let train = corpus(&[&["to", "be", "or", "not", "to", "be"]]);
        let vocab = Vocabulary::build(&train);

        let sentence = ["not", "to", "be", "seen"];
        let first = vocab.encode(&sentence);
        let second = vocab.encode(&sentence);

        assert_eq!(first.len(), sentence.len());
        assert_eq!(first, second);
        assert_eq!(first, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_save_and_load() {
        let train = corpus(&[&["a", "b", "a", "b", "c"]]);
        let vocab = Vocabulary::build(&train);

        let path = std::env::temp_dir().join(format!("vocab-{}.json", std::process::id()));
        let path = path.to_str().unwrap();

        vocab.save(path).unwrap();
        let loaded = Vocabulary::load(path).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(loaded, vocab);
        assert_eq!(loaded.index_of("b"), Some(2));
    }

    fn load_json(name: &str, contents: &str) -> anyhow::Result<Vocabulary> {
        let path = std::env::temp_dir().join(format!("vocab-{}-{}.json", name, std::process::id()));
        let path = path.to_str().unwrap();

        std::fs::write(path, contents).unwrap();
        let result = Vocabulary::load(path);
        std::fs::remove_file(path).unwrap();

        result
    }

    #[test]
    fn test_load_requires_the_sentinel_first() {
        assert!(load_json("sentinel-last", r#"{"idx2word":["a","<<UNK>>"]}"#).is_err());
        assert!(load_json("empty", r#"{"idx2word":[]}"#).is_err());
    }

    #[test]
    fn test_load_rejects_duplicate_tokens() {
        assert!(load_json("duplicate", r#"{"idx2word":["<<UNK>>","a","b","a"]}"#).is_err());
        assert!(load_json("sentinel-twice", r#"{"idx2word":["<<UNK>>","<<UNK>>"]}"#).is_err());

        let vocab = load_json("unique", r#"{"idx2word":["<<UNK>>","a","b"]}"#).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.index_of("b"), Some(2));
    }
}
