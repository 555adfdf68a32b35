use crate::app::{AppContext, Result};
use crate::cli::HeadlinesArgs;
use crate::controller::{FeedController, FeedView, PageRequest, PageResponse};
use crate::domain::{Article, Category};
use crate::filter::DateRange;
use crate::store::SqliteStore;

pub async fn headlines(ctx: &AppContext, args: &HeadlinesArgs) -> Result<()> {
    let category = args.category.parse::<Category>()?;
    let mut controller = FeedController::with_category(ctx.store.clone(), category);

    let request = controller.refresh();
    load(ctx, &mut controller, request).await?;

    if args.page != controller.window().page {
        if let Some(request) = controller.set_page(args.page)? {
            load(ctx, &mut controller, request).await?;
        }
    }

    if let Some(term) = &args.search {
        controller.set_search_term(term.as_str());
    }
    let from = args.from.as_deref().unwrap_or("");
    let to = args.to.as_deref().unwrap_or("");
    controller.set_date_range(DateRange::parse(from, to)?);

    print!("{}", render_view(&controller.view()));
    Ok(())
}

/// Run a request to completion, failing the command on a fetch error.
async fn load(
    ctx: &AppContext,
    controller: &mut FeedController<SqliteStore>,
    request: PageRequest,
) -> Result<()> {
    let PageResponse {
        generation,
        window,
        result,
    } = request.execute(ctx.fetcher.as_ref()).await;
    let page = result?;
    controller.apply(PageResponse {
        generation,
        window,
        result: Ok(page),
    });
    Ok(())
}

pub fn favorites(ctx: &AppContext) -> Result<()> {
    let controller = FeedController::new(ctx.store.clone());
    let favorites = controller.favorites();

    if favorites.is_empty() {
        println!("No saved articles");
        return Ok(());
    }

    println!("{} saved articles:", favorites.len());
    for article in favorites.iter() {
        println!();
        print!("{}", render_article(article, true));
    }
    Ok(())
}

fn render_view(view: &FeedView<'_>) -> String {
    let mut out = format!(
        "{} · page {} of {} ({} results)\n",
        view.category, view.page, view.total_pages, view.total_results
    );

    if view.articles.is_empty() {
        if view.criteria.is_empty() {
            out.push_str("No articles\n");
        } else {
            out.push_str("No articles on this page match the filters\n");
        }
        return out;
    }

    for article in &view.articles {
        out.push('\n');
        out.push_str(&render_article(article, view.is_favorite(article)));
    }
    out
}

fn render_article(article: &Article, favorite: bool) -> String {
    let marker = if favorite { "♥" } else { " " };
    let date = article
        .published()
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "undated".to_string());

    let mut out = format!("{} {}\n", marker, article.display_title());
    out.push_str(&format!("  {} · {}\n", article.display_author(), date));
    if let Some(description) = &article.description {
        out.push_str(&format!("  {}\n", description));
    }
    if let Some(url) = &article.url {
        out.push_str(&format!("  {}\n", url));
    }
    out
}
