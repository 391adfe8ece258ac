//! Item Details Component
//!
//! Full view of one car: image carousel with a paged thumbnail strip,
//! the property table, and edit/delete actions for logged-in users.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsValue;

use crate::carousel::CarouselNavigator;
use crate::components::{swap_to_placeholder, DeleteConfirmButton};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::format::{color_value, display_property, CarProperty, PropertyValue};
use crate::models::{Car, CarId};
use crate::route::Route;
use crate::store::use_services;

fn text(value: &Option<String>) -> Option<PropertyValue<'_>> {
    value.as_deref().map(PropertyValue::Text)
}

/// Label/value pairs for the property table, already formatted
pub fn property_rows(car: &Car) -> Vec<(&'static str, String)> {
    let d = &car.data;
    vec![
        ("Price", display_property(Some(d.price.into()), CarProperty::Price)),
        ("Year", d.year.to_string()),
        ("Age", display_property(Some(d.year.into()), CarProperty::Year)),
        ("Mileage", display_property(d.mileage.map(PropertyValue::from), CarProperty::Mileage)),
        ("Color", display_property(Some((&d.color).into()), CarProperty::Plain)),
        (
            "Fuel type",
            display_property(d.fuel_type.map(|f| f.as_str().into()), CarProperty::Plain),
        ),
        ("Transmission", display_property(text(&d.transmission), CarProperty::SHORT_TEXT)),
        ("Engine", display_property(text(&d.engine), CarProperty::Engine)),
        ("Horsepower", display_property(d.horsepower.map(PropertyValue::from), CarProperty::Plain)),
        ("0-100 km/h (s)", display_property(d.acceleration.map(PropertyValue::from), CarProperty::Plain)),
        (
            "Body type",
            display_property(d.body_type.map(|b| b.as_str().into()), CarProperty::Plain),
        ),
        ("Doors", display_property(d.doors.map(PropertyValue::from), CarProperty::Plain)),
        ("Seats", display_property(d.seats.map(PropertyValue::from), CarProperty::Plain)),
        (
            "Drivetrain",
            display_property(d.drivetrain.map(|v| v.as_str().into()), CarProperty::Plain),
        ),
        (
            "Fuel consumption",
            display_property(d.fuel_consumption.map(PropertyValue::from), CarProperty::FuelConsumption),
        ),
        ("CO2 emission (g/km)", display_property(d.co2_emission.map(PropertyValue::from), CarProperty::Plain)),
        ("Warranty", display_property(text(&d.warranty), CarProperty::Warranty)),
        (
            "Condition",
            match d.is_new {
                Some(true) => "New".to_string(),
                Some(false) => "Used".to_string(),
                None => display_property(None, CarProperty::Plain),
            },
        ),
    ]
}

/// Title and message passed to the share sheet
pub fn share_message(car: &Car) -> (String, String) {
    let title = car.title();
    let text = format!("Check out this {} for ${}!", title, car.data.price);
    (title, text)
}

enum ShareOutcome {
    Shared,
    Copied,
    Unavailable,
}

/// Web Share API when the browser has it, else copy the page link
fn share_car(car: &Car) -> ShareOutcome {
    let Some(window) = web_sys::window() else {
        return ShareOutcome::Unavailable;
    };
    let url = window.location().href().unwrap_or_default();
    let navigator = window.navigator();

    if js_sys::Reflect::has(&navigator, &JsValue::from_str("share")).unwrap_or(false) {
        let (title, text) = share_message(car);
        let data = web_sys::ShareData::new();
        data.set_title(&title);
        data.set_text(&text);
        data.set_url(&url);
        let _ = navigator.share_with_data(&data);
        ShareOutcome::Shared
    } else {
        let _ = navigator.clipboard().write_text(&url);
        ShareOutcome::Copied
    }
}

/// `(name, inline style)` for each color option swatch
pub fn color_swatches(names: &[String]) -> Vec<(String, String)> {
    names
        .iter()
        .map(|name| (name.clone(), format!("background-color: {}", color_value(name))))
        .collect()
}

/// Image carousel driven by a [`CarouselNavigator`]
#[component]
fn Carousel(nav: RwSignal<Option<CarouselNavigator>>, placeholder: String) -> impl IntoView {
    let current_image = move || {
        nav.with(|n| n.as_ref().map(|n| n.current_image().to_string()))
            .unwrap_or_default()
    };
    let navigable = move || nav.with(|n| n.as_ref().is_some_and(|n| n.is_navigable()));
    let position = move || {
        nav.with(|n| {
            n.as_ref()
                .map(|n| format!("{} / {}", n.current_index() + 1, n.gallery().len()))
                .unwrap_or_default()
        })
    };
    let thumbnails = move || {
        nav.with(|n| {
            n.as_ref()
                .map(|n| {
                    n.visible_thumbnails()
                        .into_iter()
                        .map(|(i, src)| (i, src.to_string(), i == n.current_index()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };
    let can_left = move || nav.with(|n| n.as_ref().is_some_and(|n| n.can_scroll_left()));
    let can_right = move || nav.with(|n| n.as_ref().is_some_and(|n| n.can_scroll_right()));

    let step = move |f: fn(&mut CarouselNavigator)| {
        nav.update(|n| {
            if let Some(n) = n.as_mut() {
                f(n);
            }
        })
    };

    view! {
        <div class="carousel">
            <div class="carousel-main">
                <Show when=navigable>
                    <button class="carousel-btn prev" on:click=move |_| step(CarouselNavigator::previous)>"‹"</button>
                </Show>
                <img
                    class="carousel-image"
                    src=current_image
                    alt="Car image"
                    on:error=move |ev| swap_to_placeholder(&ev, &placeholder)
                />
                <Show when=navigable>
                    <button class="carousel-btn next" on:click=move |_| step(CarouselNavigator::next)>"›"</button>
                    <span class="carousel-position">{position}</span>
                </Show>
            </div>

            <Show when=navigable>
                <div class="thumbnail-strip">
                    <button
                        class="thumb-scroll"
                        disabled=move || !can_left()
                        on:click=move |_| step(CarouselNavigator::previous_window)
                    >
                        "«"
                    </button>
                    {move || thumbnails()
                        .into_iter()
                        .map(|(index, src, active)| view! {
                            <img
                                class=if active { "thumbnail active" } else { "thumbnail" }
                                src=src
                                alt=format!("Image {}", index + 1)
                                on:click=move |_| nav.update(|n| {
                                    if let Some(n) = n.as_mut() {
                                        n.select_index(index);
                                    }
                                })
                            />
                        })
                        .collect_view()}
                    <button
                        class="thumb-scroll"
                        disabled=move || !can_right()
                        on:click=move |_| step(CarouselNavigator::next_window)
                    >
                        "»"
                    </button>
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn ItemDetails(id: CarId) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let config = expect_context::<AppConfig>();
    let services = use_services();

    let car = RwSignal::new(None::<Car>);
    let nav = RwSignal::new(None::<CarouselNavigator>);
    let error = RwSignal::new(None::<String>);
    let deleting = RwSignal::new(false);
    let notice = RwSignal::new(None::<&'static str>);

    let placeholder = config.placeholder_image.clone();
    let window = config.thumbnail_window;
    spawn_local(async move {
        match services.catalog().get_by_id(id).await {
            Ok(loaded) => {
                let _ = nav.try_set(Some(CarouselNavigator::for_car(&loaded, placeholder, window)));
                let _ = car.try_set(Some(loaded));
            }
            Err(e) => {
                log::warn!("[DETAILS] Could not load car {}: {}", id, e);
                let _ = error.try_set(Some(e.to_string()));
            }
        }
    });

    let on_delete = Callback::new(move |_| {
        deleting.set(true);
        spawn_local(async move {
            match services.catalog().delete(id).await {
                Ok(()) => ctx.navigate(Route::Items),
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                    let _ = deleting.try_set(false);
                }
            }
        });
    });

    let on_share = move |_| {
        let Some(current) = car.get_untracked() else {
            return;
        };
        match share_car(&current) {
            ShareOutcome::Shared => notice.set(None),
            ShareOutcome::Copied => notice.set(Some("Link copied to clipboard!")),
            ShareOutcome::Unavailable => log::warn!("[DETAILS] Sharing is not available"),
        }
    };

    let placeholder = config.placeholder_image.clone();

    view! {
        <section class="item-details">
            <button class="btn back-btn" on:click=move |_| ctx.navigate(Route::Items)>"← Back to list"</button>

            {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}

            <Show
                when=move || car.with(Option::is_some)
                fallback=move || view! {
                    <Show when=move || error.with(Option::is_none)>
                        <p class="loading">"Loading car..."</p>
                    </Show>
                }
            >
                <div class="details-layout">
                    <Carousel nav=nav placeholder=placeholder.clone() />

                    <div class="details-info">
                        <h2>{move || car.with(|c| c.as_ref().map(Car::title).unwrap_or_default())}</h2>

                        <div class="details-actions">
                            <button class="btn" on:click=on_share>"Share"</button>
                            <Show when=move || ctx.logged_in.get()>
                                <button class="btn" on:click=move |_| ctx.navigate(Route::Edit(id))>"Edit"</button>
                                <DeleteConfirmButton label="Delete" busy=deleting on_confirm=on_delete />
                            </Show>
                        </div>
                        {move || notice.get().map(|m| view! { <p class="notice">{m}</p> })}

                        <table class="property-table">
                            <tbody>
                                {move || car.with(|c| c.as_ref().map(property_rows).unwrap_or_default())
                                    .into_iter()
                                    .map(|(label, value)| view! {
                                        <tr><th>{label}</th><td>{value}</td></tr>
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>

                        {move || car.with(|c| c.as_ref().and_then(|c| c.data.description.clone()))
                            .map(|d| view! { <p class="details-description">{d}</p> })}

                        {move || {
                            let features = car.with(|c| c.as_ref().map(|c| c.data.features.clone()).unwrap_or_default());
                            (!features.is_empty()).then(|| view! {
                                <h3>"Features"</h3>
                                <ul class="feature-list">
                                    {features.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
                                </ul>
                            })
                        }}

                        {move || {
                            let options = car.with(|c| c.as_ref().map(|c| c.data.color_options.clone()).unwrap_or_default());
                            (!options.is_empty()).then(|| view! {
                                <h3>"Available colors"</h3>
                                <div class="color-options">
                                    {color_swatches(&options).into_iter().map(|(name, style)| {
                                        let title = name.clone();
                                        view! {
                                            <span class="color-option" title=title>
                                                <span class="color-swatch" style=style></span>
                                                {name}
                                            </span>
                                        }
                                    }).collect_view()}
                                </div>
                            })
                        }}
                    </div>
                </div>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CarDraft, FuelType};

    fn lookup<'a>(rows: &'a [(&'static str, String)], label: &str) -> &'a str {
        rows.iter().find(|(l, _)| *l == label).map(|(_, v)| v.as_str()).unwrap()
    }

    #[test]
    fn test_property_rows_format_values() {
        let car = Car::new(
            4,
            CarDraft {
                brand: "Tesla".to_string(),
                model: "Model 3".to_string(),
                year: 2023,
                color: "Pearl White".to_string(),
                price: 42_000.0,
                mileage: Some(150_000.0),
                fuel_type: Some(FuelType::Electric),
                fuel_consumption: Some(0.0),
                warranty: Some("4 years or 80,000 km".to_string()),
                ..Default::default()
            },
        );
        let rows = property_rows(&car);
        assert_eq!(lookup(&rows, "Price"), "$42K");
        assert_eq!(lookup(&rows, "Mileage"), "150K km");
        assert_eq!(lookup(&rows, "Fuel type"), "Electric");
        assert_eq!(lookup(&rows, "Fuel consumption"), "Electric");
        assert_eq!(lookup(&rows, "Warranty"), "4 years / 80,000 km");
    }

    #[test]
    fn test_share_message() {
        let car = Car::new(
            2,
            CarDraft { brand: "BMW".to_string(), model: "X5".to_string(), price: 55000.0, ..Default::default() },
        );
        let (title, text) = share_message(&car);
        assert_eq!(title, "BMW X5");
        assert_eq!(text, "Check out this BMW X5 for $55000!");
    }

    #[test]
    fn test_color_swatches_keep_names() {
        let swatches = color_swatches(&["Electric Blue".to_string(), "Chartreuse".to_string()]);
        assert_eq!(
            swatches,
            vec![
                ("Electric Blue".to_string(), "background-color: #2563eb".to_string()),
                ("Chartreuse".to_string(), "background-color: #6b7280".to_string()),
            ]
        );
    }

    #[test]
    fn test_property_rows_missing_values() {
        let car = Car::new(1, CarDraft::default());
        let rows = property_rows(&car);
        assert_eq!(lookup(&rows, "Engine"), "N/A");
        assert_eq!(lookup(&rows, "Doors"), "N/A");
        assert_eq!(lookup(&rows, "Condition"), "N/A");
        assert_eq!(lookup(&rows, "Color"), "N/A");
    }
}
