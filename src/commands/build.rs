//! Build the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Load every post and write the site to the public directory.
///
/// A single bad post fails the whole build.
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = blog.posts().get_all_posts()?;
    tracing::info!("Loaded {} posts from {:?}", posts.len(), blog.posts_dir);

    let generator = Generator::new(blog)?;
    generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
