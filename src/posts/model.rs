//! Post types and id derivation.

use serde::{Deserialize, Serialize};

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl Post {
    /// Build a post, deriving its id from the title.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: derive_id(&title),
            title,
            content: content.into(),
        }
    }
}

/// Body accepted by the create endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// Lower-case the title and replace each run of whitespace with one `_`.
pub fn derive_id(title: &str) -> String {
    let mut id = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('_');
            }
            in_whitespace = true;
        } else {
            id.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    id
}

/// Posts present at startup.
pub fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: "my_first_post".to_string(),
            title: "My first post".to_string(),
            content: "Hello!".to_string(),
        },
        Post {
            id: "my_second_post".to_string(),
            title: "My second post".to_string(),
            content: "Second post!".to_string(),
        },
        Post {
            id: "my_third_post".to_string(),
            title: "나의 세번째 포스트".to_string(),
            content: "세번째 포스트!".to_string(),
        },
    ]
}
