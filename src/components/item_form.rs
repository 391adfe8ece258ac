//! Item Form Component
//!
//! Create and edit form for a car. Edit mode prefills from the backend;
//! validation runs locally before anything is sent.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::form::{error_for, CarForm, Field};
use crate::format::current_year;
use crate::models::{Car, CarId};
use crate::route::Route;
use crate::store::use_services;
use crate::validation::FieldError;

/// Form sections in display order
const SECTIONS: &[(&str, &[Field])] = &[
    ("Basics", &[Field::Brand, Field::Model, Field::Year, Field::Color, Field::Price, Field::Mileage]),
    (
        "Technical",
        &[
            Field::FuelType,
            Field::Transmission,
            Field::Engine,
            Field::Horsepower,
            Field::Acceleration,
            Field::BodyType,
            Field::Doors,
            Field::Seats,
            Field::Drivetrain,
            Field::FuelConsumption,
            Field::Co2Emission,
        ],
    ),
    ("Details", &[Field::Description, Field::Warranty, Field::Features, Field::ColorOptions]),
    ("Images", &[Field::ImageUrl, Field::Gallery]),
];

/// One labelled input bound to a [`CarForm`] field
#[component]
fn FormField(field: Field, form: RwSignal<CarForm>, errors: RwSignal<Vec<FieldError>>) -> impl IntoView {
    let value = move || form.with(|f| f.get(field).to_string());
    let set = move |v: String| form.update(|f| f.set(field, v));
    let error = move || errors.with(|e| error_for(e, field));

    let input = if let Some(options) = field.options() {
        view! {
            <select
                prop:value=value
                on:change=move |ev| set(event_target_value(&ev))
            >
                <option value="">"Select..."</option>
                {options.into_iter().map(move |o| view! {
                    <option value=o selected=move || value() == o>{o}</option>
                }).collect_view()}
            </select>
        }
        .into_any()
    } else if field.is_multiline() {
        view! {
            <textarea
                rows=4
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type=if field.is_numeric() { "number" } else { "text" }
                step="any"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <label class=move || if error().is_some() { "form-field invalid" } else { "form-field" }>
            <span class="form-label">{field.label()}</span>
            {input}
            {move || error().map(|message| view! { <span class="field-error">{message}</span> })}
        </label>
    }
}

/// `edit`: `Some(id)` to edit an existing car, `None` to create
#[component]
pub fn ItemForm(edit: Option<CarId>) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let services = use_services();

    let form = RwSignal::new(CarForm::new(current_year()));
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let banner = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let loading = RwSignal::new(edit.is_some());

    if let Some(id) = edit {
        spawn_local(async move {
            match services.catalog().get_by_id(id).await {
                Ok(car) => {
                    let _ = form.try_set(CarForm::from_car(&car));
                }
                Err(e) => {
                    log::warn!("[FORM] Could not load car {} for editing: {}", id, e);
                    let _ = banner.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    }

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let draft = match form.with_untracked(|f| f.to_draft(current_year())) {
            Ok(draft) => draft,
            Err(field_errors) => {
                log::debug!("[FORM] {} validation errors", field_errors.len());
                errors.set(field_errors);
                banner.set(Some("Please fix the highlighted fields".to_string()));
                return;
            }
        };

        errors.set(Vec::new());
        banner.set(None);
        saving.set(true);
        spawn_local(async move {
            let catalog = services.catalog();
            let result = match edit {
                Some(id) => catalog.update(&Car::new(id, draft)).await,
                None => catalog.create(&draft).await,
            };
            match result {
                Ok(car) => {
                    log::info!("[FORM] Saved car {}", car.id);
                    ctx.navigate(Route::Items);
                }
                Err(e) => {
                    let _ = banner.try_set(Some(e.to_string()));
                    let _ = saving.try_set(false);
                }
            }
        });
    };

    let cancel = move |_| match edit {
        Some(id) => ctx.navigate(Route::Details(id)),
        None => ctx.navigate(Route::Items),
    };

    view! {
        <section class="item-form">
            <h2>{if edit.is_some() { "Edit car" } else { "Add car" }}</h2>

            {move || banner.get().map(|message| view! { <div class="error-banner">{message}</div> })}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="loading">"Loading car..."</p> }
            >
                <form on:submit=submit>
                    {SECTIONS.iter().map(|(title, fields)| view! {
                        <fieldset class="form-section">
                            <legend>{*title}</legend>
                            {fields.iter().map(|field| view! {
                                <FormField field=*field form=form errors=errors />
                            }).collect_view()}
                        </fieldset>
                    }).collect_view()}

                    <label class="form-field checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.is_new)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|f| f.is_new = checked);
                            }
                        />
                        <span class="form-label">"New car"</span>
                    </label>

                    <div class="form-actions">
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                        <button type="button" class="btn" on:click=cancel>"Cancel"</button>
                    </div>
                </form>
            </Show>
        </section>
    }
}
