//! Sample content for a fresh, empty blog.
//!
//! Runs once at startup when configured. Output depends only on the post
//! index, so a restart produces the same listing.

use chrono::Utc;
use domains::{Category, DomainResult, NewPost, PostRepository};
use tracing::info;

/// Last year mentioned in generated descriptions; each later post steps back one year.
const NEWEST_SAMPLE_YEAR: i64 = 2025;

/// Number of stock images shipped as `/uploads/sample<n>.jpg`.
const SAMPLE_IMAGES: usize = 5;

/// Appends `count` generated posts and returns how many were written.
pub async fn seed_sample_posts(posts: &dyn PostRepository, count: usize) -> DomainResult<usize> {
    for i in 0..count {
        posts.append(sample_post(i)).await?;
    }
    if count > 0 {
        info!(count, "seeded sample posts");
    }
    Ok(count)
}

/// The `index`-th sample post (0-based).
pub fn sample_post(index: usize) -> NewPost {
    let category = Category::ALL[index % Category::ALL.len()];
    let slug = category.as_str();

    NewPost {
        title: format!("{} Post {}", slug.replacen('-', " ", 1).to_uppercase(), index + 1),
        date: Utc::now(),
        category,
        description: format!(
            "A brief overview of {slug} advancements and trends in {}.",
            NEWEST_SAMPLE_YEAR - index as i64
        ),
        content: long_form(slug),
        image: Some(format!("/uploads/sample{}.jpg", index % SAMPLE_IMAGES)),
        verified: true,
    }
}

/// Five paragraphs about `topic`, separated by HTML line breaks for the
/// post page.
fn long_form(topic: &str) -> String {
    [
        format!(
            "{topic} has moved from a niche specialty to something most engineering teams touch \
             every week. Cheaper compute, better tooling and a steady stream of published research \
             have made it practical well outside the largest companies."
        ),
        format!(
            "Teams adopting {topic} usually start small: one pipeline, one model, one dashboard. \
             The hard part is rarely the algorithm. It is the plumbing around it, the data \
             contracts, and the people who understand both the domain and the code."
        ),
        format!(
            "Responsible practice matters as much as raw capability. Privacy, bias and \
             accountability questions come up early in any serious {topic} project, and the \
             organisations that handle them well write their guidelines down before shipping."
        ),
        format!(
            "Looking forward, expect {topic} to lean on edge deployments, specialised hardware \
             and open-source collaboration. Healthcare and finance are already seeing the effects, \
             from faster diagnostics to sharper fraud detection."
        ),
        format!(
            "Progress in {topic} is interdisciplinary. Mathematics, systems engineering, design \
             and ethics all have a seat at the table, and the most durable results come from \
             teams that bring those perspectives together."
        ),
    ]
    .join("\n<br><br>\n")
}
