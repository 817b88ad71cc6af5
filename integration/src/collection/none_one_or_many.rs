use serde::{Deserialize, Serialize};

/// Zero, one, or several `T`s.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoneOneOrMany<T> {
    #[default]
    None,
    One(T),
    Many(Vec<T>),
}

impl<T> NoneOneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            NoneOneOrMany::None => &[],
            NoneOneOrMany::One(item) => std::slice::from_ref(item),
            NoneOneOrMany::Many(items) => items.as_slice(),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            NoneOneOrMany::None => Vec::new(),
            NoneOneOrMany::One(item) => vec![item],
            NoneOneOrMany::Many(items) => items,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NoneOneOrMany::None)
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_empty_one_and_many_are_not() {
        assert!(NoneOneOrMany::<i32>::None.is_empty());
        assert!(!NoneOneOrMany::One(1).is_empty());
        assert!(!NoneOneOrMany::Many(vec![1, 2]).is_empty());
    }
}
