//! List posts

use anyhow::Result;

use crate::Blog;

/// Print every post, newest first
pub fn run(blog: &Blog) -> Result<()> {
    let posts = blog.posts().get_all_posts()?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {} - {} [{}]", post.friendly_date, post.title, post.slug);
    }

    Ok(())
}
