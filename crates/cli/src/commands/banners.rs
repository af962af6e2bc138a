//! Banner commands.
//!
//! # Usage
//!
//! ```bash
//! enzobay-cli banners list                 # live banners in every slot
//! enzobay-cli banners list -p home_top     # one slot
//! enzobay-cli banners dismiss banner-home-hero
//! enzobay-cli banners reset
//! ```

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use enzobay_core::{Banner, BannerId, BannerPosition};
use enzobay_storefront::banners::BannerService;
use enzobay_storefront::clock::{Clock, SystemClock};
use enzobay_storefront::stores::ClosedBannersStore;

use super::{CliError, open_storage};

fn service(clock: Arc<dyn Clock>) -> BannerService {
    BannerService::builtin(Duration::ZERO, clock)
}

fn banner_line(out: &mut String, banner: &Banner) {
    let _ = writeln!(
        out,
        "  [{}] {:<28} {}  -> {}",
        banner.priority, banner.id, banner.title, banner.cta_link
    );
}

/// Live, undismissed banners for one slot or every slot.
///
/// # Errors
///
/// Returns `CliError::Storage` if the data directory cannot be opened.
pub async fn list(
    data_dir: &Path,
    position: Option<BannerPosition>,
    clock: Arc<dyn Clock>,
) -> Result<String, CliError> {
    let closed = ClosedBannersStore::new(open_storage(data_dir)?);
    let service = service(clock);
    let positions: Vec<BannerPosition> =
        position.map_or_else(|| BannerPosition::ALL.to_vec(), |p| vec![p]);

    let mut out = String::new();
    for position in positions {
        let banners = closed.visible(service.get_banners_by_position(position).await);
        if banners.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{position}");
        for banner in &banners {
            banner_line(&mut out, banner);
        }
    }

    if out.is_empty() {
        out.push_str("No banners to show\n");
    }
    Ok(out)
}

/// Hide a banner until `reset`.
///
/// # Errors
///
/// Returns `CliError::BannerNotFound` for an unknown id, or
/// `CliError::Storage` if the dismissal cannot be saved.
pub async fn dismiss(data_dir: &Path, id: &str) -> Result<String, CliError> {
    let id = BannerId::new(id);
    if service(Arc::new(SystemClock))
        .get_banner_by_id(&id)
        .await
        .is_none()
    {
        return Err(CliError::BannerNotFound(id.to_string()));
    }

    let closed = ClosedBannersStore::new(open_storage(data_dir)?);
    let newly_dismissed = closed.dismiss(id.clone());
    closed.flush()?;
    if newly_dismissed {
        Ok(format!("Dismissed {id}\n"))
    } else {
        Ok(format!("{id} was already dismissed\n"))
    }
}

/// Forget every dismissed banner.
///
/// # Errors
///
/// Returns `CliError::Storage` if the data directory cannot be opened.
pub fn reset(data_dir: &Path) -> Result<String, CliError> {
    let closed = ClosedBannersStore::new(open_storage(data_dir)?);
    closed.reset();
    closed.flush()?;
    Ok("Dismissed banners cleared\n".to_string())
}
