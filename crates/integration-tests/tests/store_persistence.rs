//! Integration tests for store snapshots over file storage.
//!
//! Each test builds stores over a data directory, drops them, and rebuilds
//! over the same directory the way a restarted process would.

#![allow(clippy::unwrap_used)]

use enzobay_core::{BannerId, ProductId, User, UserId, UserRole};
use enzobay_integration_tests::TestContext;
use enzobay_storefront::catalog::Catalog;
use enzobay_storefront::storage::keys;
use enzobay_storefront::stores::{
    AuthStore, CartStore, ClosedBannersStore, RecentlyViewedStore, WishlistStore,
};

fn product(id: &str) -> enzobay_core::Product {
    Catalog::builtin().get(&ProductId::new(id)).cloned().unwrap()
}

#[test]
fn test_cart_survives_restart() {
    let ctx = TestContext::new();
    {
        let cart = CartStore::new(ctx.storage().unwrap());
        cart.add_item(product("p-1"), 2);
        cart.add_item(product("p-3"), 1);
        cart.update_quantity(&ProductId::new("p-1"), 3);
    }

    let cart = CartStore::new(ctx.storage().unwrap());
    assert_eq!(cart.item_count(), 4);
    assert!(cart.contains(&ProductId::new("p-3")));
    assert_eq!(cart.items()[0].product.id.as_str(), "p-1");
}

#[test]
fn test_snapshot_files_use_fixed_keys_and_layout() {
    let ctx = TestContext::new();
    let storage = ctx.storage().unwrap();

    CartStore::new(storage.clone()).add_item(product("p-2"), 1);
    WishlistStore::new(storage.clone()).add_item(product("p-9"));
    RecentlyViewedStore::new(storage.clone()).add_item(product("p-5"));
    ClosedBannersStore::new(storage).dismiss(BannerId::new("banner-home-hero"));

    for key in [keys::CART, keys::WISHLIST, keys::RECENTLY_VIEWED] {
        let raw = std::fs::read_to_string(ctx.dir().join(format!("{key}.json"))).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 0, "{key}");
        assert!(json["state"]["items"].is_array(), "{key}");
    }

    let raw =
        std::fs::read_to_string(ctx.dir().join(format!("{}.json", keys::CLOSED_BANNERS))).unwrap();
    assert_eq!(raw, r#"["banner-home-hero"]"#);
}

#[test]
fn test_wishlist_and_recently_viewed_survive_restart() {
    let ctx = TestContext::new();
    {
        let wishlist = WishlistStore::new(ctx.storage().unwrap());
        wishlist.add_item(product("p-4"));
        wishlist.toggle(product("p-8"));

        let viewed = RecentlyViewedStore::new(ctx.storage().unwrap());
        for n in 1..=12 {
            viewed.add_item(product(&format!("p-{n}")));
        }
    }

    let wishlist = WishlistStore::new(ctx.storage().unwrap());
    assert!(wishlist.is_in_wishlist(&ProductId::new("p-4")));
    assert!(wishlist.is_in_wishlist(&ProductId::new("p-8")));

    let viewed = RecentlyViewedStore::new(ctx.storage().unwrap()).items();
    assert_eq!(viewed.len(), 10);
    assert_eq!(viewed[0].id.as_str(), "p-12");
    assert_eq!(viewed[9].id.as_str(), "p-3");
}

#[test]
fn test_auth_survives_restart() {
    let ctx = TestContext::new();
    AuthStore::new(ctx.storage().unwrap()).sign_in(User {
        id: UserId::new("u-42"),
        name: "Seller Sam".to_string(),
        email: "sam@example.com".to_string(),
        role: UserRole::Seller,
    });

    let auth = AuthStore::new(ctx.storage().unwrap());
    assert!(auth.is_authenticated());
    assert!(auth.has_role(UserRole::Seller));

    auth.sign_out();
    assert!(!AuthStore::new(ctx.storage().unwrap()).is_authenticated());
}

#[test]
fn test_corrupt_snapshot_loads_empty_and_is_overwritten() {
    let ctx = TestContext::new();
    let storage = ctx.storage().unwrap();
    storage.set(keys::CART, "{not json").unwrap();

    let cart = CartStore::new(storage.clone());
    assert_eq!(cart.item_count(), 0);

    cart.add_item(product("p-16"), 1);
    let cart = CartStore::new(storage);
    assert_eq!(cart.item_count(), 1);
}

#[test]
fn test_hand_written_snapshot_is_read() {
    let ctx = TestContext::new();
    let storage = ctx.storage().unwrap();
    storage
        .set(keys::CLOSED_BANNERS, r#"["banner-home-fashion","banner-sidebar-bundle"]"#)
        .unwrap();

    let closed = ClosedBannersStore::new(storage);
    assert!(closed.is_dismissed(&BannerId::new("banner-home-fashion")));
    assert!(closed.is_dismissed(&BannerId::new("banner-sidebar-bundle")));
    assert!(!closed.is_dismissed(&BannerId::new("banner-home-hero")));
}
