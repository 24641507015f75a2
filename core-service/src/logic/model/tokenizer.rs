//! WordPiece Tokenizer
//!
//! BERT-style encoding for the sequence classifier: lowercase, split on
//! whitespace and punctuation, then greedy longest-match-first subwords with
//! the `##` continuation prefix.

use std::collections::HashMap;
use std::path::Path;

use ndarray::Array2;

use crate::error::{CoreError, CoreResult};

pub const UNK_TOKEN: &str = "[UNK]";
pub const CLS_TOKEN: &str = "[CLS]";
pub const SEP_TOKEN: &str = "[SEP]";
pub const PAD_TOKEN: &str = "[PAD]";

/// Continuation prefix for non-initial subwords
const CONTINUATION_PREFIX: &str = "##";

/// Words longer than this map straight to `[UNK]`
const MAX_CHARS_PER_WORD: usize = 100;

/// Encoded batch ready for the model: (input_ids, attention_mask)
pub type EncodedBatch = (Array2<i64>, Array2<i64>);

#[derive(Debug, Clone)]
pub struct WordPieceTokenizer {
    vocab: HashMap<String, i64>,
    unk_id: i64,
    cls_id: i64,
    sep_id: i64,
    pad_id: i64,
    max_len: usize,
}

impl WordPieceTokenizer {
    /// Load a `vocab.txt` (one token per line, id = line number)
    pub fn from_file(path: impl AsRef<Path>, max_len: usize) -> CoreResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        log::info!("Loaded vocabulary from {}", path.display());
        Self::from_tokens(contents.lines(), max_len)
    }

    pub fn from_tokens<'a>(
        tokens: impl IntoIterator<Item = &'a str>,
        max_len: usize,
    ) -> CoreResult<Self> {
        if max_len < 2 {
            return Err(CoreError::Tokenizer(format!(
                "max sequence length {} leaves no room for [CLS]/[SEP]",
                max_len
            )));
        }

        let mut vocab = HashMap::new();
        for (id, token) in tokens.into_iter().enumerate() {
            let token = token.trim_end_matches('\r');
            // First occurrence wins, like the reference vocab loaders
            vocab.entry(token.to_string()).or_insert(id as i64);
        }

        let special = |name: &str| {
            vocab
                .get(name)
                .copied()
                .ok_or_else(|| CoreError::Tokenizer(format!("vocabulary has no {} token", name)))
        };

        Ok(Self {
            unk_id: special(UNK_TOKEN)?,
            cls_id: special(CLS_TOKEN)?,
            sep_id: special(SEP_TOKEN)?,
            pad_id: special(PAD_TOKEN)?,
            vocab,
            max_len,
        })
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Token ids including `[CLS]` and `[SEP]`, truncated to `max_len`
    pub fn encode(&self, text: &str) -> Vec<i64> {
        let mut ids = Vec::with_capacity(16);
        ids.push(self.cls_id);

        let budget = self.max_len - 2;
        'words: for word in basic_tokenize(text) {
            for id in self.wordpiece(&word) {
                if ids.len() - 1 >= budget {
                    break 'words;
                }
                ids.push(id);
            }
        }

        ids.push(self.sep_id);
        ids
    }

    /// Encode and pad a batch to its longest member
    pub fn encode_batch(&self, texts: &[&str]) -> CoreResult<EncodedBatch> {
        let encoded: Vec<Vec<i64>> = texts.iter().map(|t| self.encode(t)).collect();
        let rows = encoded.len();
        let cols = encoded.iter().map(Vec::len).max().unwrap_or(0);

        let mut input_ids = Vec::with_capacity(rows * cols);
        let mut attention_mask = Vec::with_capacity(rows * cols);
        for ids in &encoded {
            input_ids.extend_from_slice(ids);
            attention_mask.extend(std::iter::repeat(1i64).take(ids.len()));

            let padding = cols - ids.len();
            input_ids.extend(std::iter::repeat(self.pad_id).take(padding));
            attention_mask.extend(std::iter::repeat(0i64).take(padding));
        }

        let ids = Array2::from_shape_vec((rows, cols), input_ids)
            .map_err(|e| CoreError::Tokenizer(format!("input_ids shape: {}", e)))?;
        let mask = Array2::from_shape_vec((rows, cols), attention_mask)
            .map_err(|e| CoreError::Tokenizer(format!("attention_mask shape: {}", e)))?;

        Ok((ids, mask))
    }

    /// Greedy longest-match-first split of one basic token
    fn wordpiece(&self, word: &str) -> Vec<i64> {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() > MAX_CHARS_PER_WORD {
            return vec![self.unk_id];
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let mut end = chars.len();
            let mut matched = None;

            while start < end {
                let piece: String = chars[start..end].iter().collect();
                let candidate = if start > 0 {
                    format!("{}{}", CONTINUATION_PREFIX, piece)
                } else {
                    piece
                };
                if let Some(&id) = self.vocab.get(&candidate) {
                    matched = Some(id);
                    break;
                }
                end -= 1;
            }

            match matched {
                Some(id) => pieces.push(id),
                // Any unmatched remainder makes the whole word unknown
                None => return vec![self.unk_id],
            }
            start = end;
        }

        pieces
    }
}

/// Lowercase, split on whitespace, and isolate punctuation characters
fn basic_tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for word in text.to_lowercase().split_whitespace() {
        let mut current = String::new();
        for c in word.chars() {
            if c.is_control() {
                continue;
            }
            if is_punctuation(c) {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            } else {
                current.push(c);
            }
        }
        if !current.is_empty() {
            tokens.push(current);
        }
    }

    tokens
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace() && !c.is_ascii())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vec<&'static str> {
        vec![
            "[PAD]", "[UNK]", "[CLS]", "[SEP]", "kernel", "panic", "seg", "##fault", ":", ",",
            "disk", "error", "##s",
        ]
    }

    #[test]
    fn test_encode_wraps_and_splits_subwords() {
        let tokenizer = WordPieceTokenizer::from_tokens(vocab(), 512).unwrap();
        let ids = tokenizer.encode("Kernel PANIC: segfault, errors");

        // [CLS] kernel panic : seg ##fault , error ##s [SEP]
        assert_eq!(ids, vec![2, 4, 5, 8, 6, 7, 9, 11, 12, 3]);
    }

    #[test]
    fn test_unknown_word_maps_to_unk() {
        let tokenizer = WordPieceTokenizer::from_tokens(vocab(), 512).unwrap();
        let ids = tokenizer.encode("disk xyzzy");
        assert_eq!(ids, vec![2, 10, 1, 3]);
    }

    #[test]
    fn test_truncation_keeps_special_tokens() {
        let tokenizer = WordPieceTokenizer::from_tokens(vocab(), 4).unwrap();
        let ids = tokenizer.encode("kernel panic disk error");
        assert_eq!(ids, vec![2, 4, 5, 3]);
    }

    #[test]
    fn test_batch_is_padded_with_mask() {
        let tokenizer = WordPieceTokenizer::from_tokens(vocab(), 512).unwrap();
        let (ids, mask) = tokenizer.encode_batch(&["kernel panic", "disk"]).unwrap();

        assert_eq!(ids.shape(), &[2, 4]);
        assert_eq!(ids.row(1).to_vec(), vec![2, 10, 3, 0]);
        assert_eq!(mask.row(0).to_vec(), vec![1, 1, 1, 1]);
        assert_eq!(mask.row(1).to_vec(), vec![1, 1, 1, 0]);
    }

    #[test]
    fn test_missing_special_token_is_rejected() {
        let result = WordPieceTokenizer::from_tokens(vec!["[PAD]", "[UNK]", "[CLS]"], 512);
        assert!(matches!(result, Err(CoreError::Tokenizer(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        std::fs::write(&path, vocab().join("\n")).unwrap();

        let tokenizer = WordPieceTokenizer::from_file(&path, 512).unwrap();
        assert_eq!(tokenizer.vocab_size(), 13);
        assert_eq!(tokenizer.max_len(), 512);
    }
}
