//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `giftring_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("giftring_core version={}", giftring_core::core_version());
    println!(
        "giftring_core slugify(\"José Azevedo\")={}",
        giftring_core::slugify("José Azevedo")
    );
}
