//! Item Card Component
//!
//! One car in the catalog grid.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::format::{color_value, format_mileage, format_price};
use crate::models::Car;
use crate::route::Route;

/// Cover image: the primary image, else the first gallery entry
pub fn cover_image(car: &Car, placeholder: &str) -> String {
    car.data
        .image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .or_else(|| car.data.gallery.first().map(String::as_str))
        .unwrap_or(placeholder)
        .to_string()
}

/// Point a broken `<img>` at the placeholder, once
pub fn swap_to_placeholder(ev: &web_sys::Event, placeholder: &str) {
    let Some(img) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlImageElement>().ok())
    else {
        return;
    };
    if !img.src().ends_with(placeholder) {
        log::warn!("[IMG] Failed to load {}", img.src());
        img.set_src(placeholder);
    }
}

#[component]
pub fn ItemCard(car: Car) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let config = expect_context::<AppConfig>();

    let id = car.id;
    let placeholder = config.placeholder_image.clone();
    let image = cover_image(&car, &placeholder);
    let swatch = format!("background-color: {}", color_value(&car.data.color));
    let mileage = car.data.mileage.map(format_mileage);

    view! {
        <article class="item-card" on:click=move |_| ctx.navigate(Route::Details(id))>
            <img
                class="item-card-image"
                src=image
                alt=car.title()
                on:error=move |ev| swap_to_placeholder(&ev, &placeholder)
            />
            <div class="item-card-body">
                <h3 class="item-card-title">{car.title()}</h3>
                <p class="item-card-year">{car.data.year}</p>
                <p class="item-card-price">{format_price(car.data.price)}</p>
                {mileage.map(|m| view! { <p class="item-card-mileage">{m}</p> })}
                <p class="item-card-color">
                    <span class="color-swatch" style=swatch></span>
                    {car.data.color.clone()}
                </p>
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CarDraft;

    fn car(image_url: Option<&str>, gallery: &[&str]) -> Car {
        Car::new(
            1,
            CarDraft {
                image_url: image_url.map(str::to_string),
                gallery: gallery.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_cover_image_prefers_primary() {
        let c = car(Some("a.png"), &["b.png"]);
        assert_eq!(cover_image(&c, "none.png"), "a.png");
    }

    #[test]
    fn test_cover_image_falls_back() {
        assert_eq!(cover_image(&car(Some(""), &["b.png"]), "none.png"), "b.png");
        assert_eq!(cover_image(&car(None, &[]), "none.png"), "none.png");
    }
}
