//! Static and landing pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::middleware::SignedIn;
use crate::routes::products::ProductCard;
use crate::state::AppState;

/// Products featured on the landing page.
const FEATURED_COUNT: u64 = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductCard>,
    pub signed_in: bool,
    pub error: String,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub signed_in: bool,
    pub error: String,
}

/// Display the home page.
///
/// The featured strip is left out if the catalog is unavailable.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, SignedIn(signed_in): SignedIn) -> HomeTemplate {
    let featured = match state.bakery().products(1, FEATURED_COUNT).await {
        Ok(listing) => listing.items.into_iter().map(ProductCard::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Featured products unavailable");
            Vec::new()
        }
    };

    HomeTemplate {
        featured,
        signed_in,
        error: String::new(),
    }
}

/// Display the about page.
pub async fn about_us(SignedIn(signed_in): SignedIn) -> AboutTemplate {
    AboutTemplate {
        signed_in,
        error: String::new(),
    }
}
