// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handlers the page calls from inline attributes, plus the document-wide
//! keyboard and backdrop listeners.
//!
//! Every exported function keeps the camel-case name the markup uses, so
//! `onclick="toggleCampaign('campaign1')"` and friends work unchanged.

use alloc::format;
use alloc::string::ToString as _;

use feminova_core::search::{SearchOutcome, route};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, KeyboardEvent};

use crate::dom;
use crate::forms::{self, Donation};

const SEARCH_INPUT: &str = "searchInput";
const MODALS: &str = "[id$=\"Modal\"]";

/// Delay before the second modal opens when switching between login and
/// signup, in milliseconds.
const MODAL_SWITCH_MS: i32 = 100;

/// Delay between successive mobile menu items, in milliseconds.
const MENU_ITEM_STAGGER_MS: i32 = 50;

/// Routes the search box query: navigates on a keyword hit, otherwise
/// explains what can be searched.
#[wasm_bindgen(js_name = performSearch)]
pub fn perform_search() -> Result<(), JsValue> {
    let document = dom::document()?;
    let Some(input) = document
        .get_element_by_id(SEARCH_INPUT)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(());
    };

    let outcome = route(&input.value());
    if let SearchOutcome::Navigate(target) = outcome {
        dom::window()?.location().set_href(target)?;
    } else if let Some(message) = outcome.message() {
        dom::alert(&message);
        if outcome == SearchOutcome::Empty {
            return Ok(());
        }
    }
    input.set_value("");
    Ok(())
}

/// Expands or collapses the campaign accordion `campaign_id`.
#[wasm_bindgen(js_name = toggleCampaign)]
pub fn toggle_campaign(campaign_id: &str) -> Result<(), JsValue> {
    let document = dom::document()?;
    let (Some(content), Some(icon)) = (
        dom::by_id(&document, campaign_id),
        dom::by_id(&document, &format!("{campaign_id}-icon")),
    ) else {
        return Ok(());
    };
    dom::toggle_accordion(&content, &icon)
}

fn show_modal(id: &str) -> Result<(), JsValue> {
    let document = dom::document()?;
    if let Some(modal) = document.get_element_by_id(id) {
        let list = modal.class_list();
        list.remove_1("hidden")?;
        list.add_1("flex")?;
        dom::set_body_overflow(&document, "hidden");
    }
    Ok(())
}

/// Opens the login modal.
#[wasm_bindgen(js_name = showLogin)]
pub fn show_login() -> Result<(), JsValue> {
    show_modal("loginModal")
}

/// Opens the signup modal.
#[wasm_bindgen(js_name = showSignup)]
pub fn show_signup() -> Result<(), JsValue> {
    show_modal("signupModal")
}

/// Opens the donation modal.
#[wasm_bindgen(js_name = showDonationModal)]
pub fn show_donation_modal() -> Result<(), JsValue> {
    show_modal("donationModal")
}

/// Opens the volunteer modal.
#[wasm_bindgen(js_name = showVolunteerModal)]
pub fn show_volunteer_modal() -> Result<(), JsValue> {
    show_modal("volunteerModal")
}

/// "Donate" call to action.
#[wasm_bindgen(js_name = handleDonation)]
pub fn handle_donation() -> Result<(), JsValue> {
    show_donation_modal()
}

/// "Volunteer" call to action.
#[wasm_bindgen(js_name = handleVolunteer)]
pub fn handle_volunteer() -> Result<(), JsValue> {
    show_volunteer_modal()
}

/// Closes every modal on the page and unlocks page scroll.
#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal() -> Result<(), JsValue> {
    let document = dom::document()?;
    for modal in dom::query_all(&document, MODALS)? {
        let list = modal.class_list();
        list.add_1("hidden")?;
        list.remove_1("flex")?;
    }
    dom::set_body_overflow(&document, "auto");
    Ok(())
}

/// Swaps the login modal for the signup modal.
#[wasm_bindgen(js_name = showSignupFromLogin)]
pub fn show_signup_from_login() -> Result<(), JsValue> {
    close_modal()?;
    dom::after(MODAL_SWITCH_MS, || {
        let _ = show_signup();
    });
    Ok(())
}

/// Swaps the signup modal for the login modal.
#[wasm_bindgen(js_name = showLoginFromSignup)]
pub fn show_login_from_signup() -> Result<(), JsValue> {
    close_modal()?;
    dom::after(MODAL_SWITCH_MS, || {
        let _ = show_login();
    });
    Ok(())
}

/// Opens or closes the mobile menu. Opening brings the items in one after
/// another; closing drops them all at once.
#[wasm_bindgen(js_name = toggleMobileMenu)]
pub fn toggle_mobile_menu() -> Result<(), JsValue> {
    let document = dom::document()?;
    let Some(menu) = document.get_element_by_id("mobileMenu") else {
        return Ok(());
    };
    if let Some(icon) = document.query_selector(".hamburger-icon")? {
        icon.class_list().toggle("active")?;
    }
    let open = menu.class_list().toggle("active")?;

    let items = dom::query_all(&document, ".mobile-menu-item")?;
    if open {
        for (index, item) in items.into_iter().enumerate() {
            let menu = menu.clone();
            let delay =
                MENU_ITEM_STAGGER_MS.saturating_mul(i32::try_from(index).unwrap_or(i32::MAX));
            dom::after(delay, move || {
                // The menu may have closed again before this item's turn.
                if menu.class_list().contains("active") {
                    let _ = item.class_list().add_1("active");
                }
            });
        }
    } else {
        for item in items {
            item.class_list().remove_1("active")?;
        }
    }
    Ok(())
}

fn reset_form(event: &Event) {
    if let Some(form) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
    {
        form.reset();
    }
}

/// Contact form submit.
#[wasm_bindgen(js_name = handleContactSubmit)]
pub fn handle_contact_submit(event: Event) -> Result<(), JsValue> {
    event.prevent_default();
    let document = dom::document()?;
    let name = dom::input_value(&document, "name");
    let email = dom::input_value(&document, "email");
    dom::alert(&forms::contact_ack(&name, &email));
    reset_form(&event);
    Ok(())
}

/// Login form submit.
#[wasm_bindgen(js_name = handleLogin)]
pub fn handle_login(event: Event) -> Result<(), JsValue> {
    event.prevent_default();
    let document = dom::document()?;
    let email = dom::input_value(&document, "loginEmail");
    dom::alert(&forms::login_ack(&email));
    close_modal()?;
    reset_form(&event);
    Ok(())
}

/// Signup form submit.
#[wasm_bindgen(js_name = handleSignup)]
pub fn handle_signup(event: Event) -> Result<(), JsValue> {
    event.prevent_default();
    let document = dom::document()?;
    let name = dom::input_value(&document, "signupName");
    let email = dom::input_value(&document, "signupEmail");
    dom::alert(&forms::signup_ack(&name, &email));
    close_modal()?;
    reset_form(&event);
    Ok(())
}

/// Preset donation amount button.
///
/// `event` may be omitted, as in `onclick="selectAmount(500)"`; the
/// window's current event is used instead.
#[wasm_bindgen(js_name = selectAmount)]
pub fn select_amount(amount: f64, event: Option<Event>) -> Result<(), JsValue> {
    let document = dom::document()?;
    if let Some(input) = document
        .get_element_by_id("customAmount")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value(&amount.to_string());
    }
    for button in dom::query_all(&document, ".amount-btn")? {
        let list = button.class_list();
        list.remove_2("border-pink-600", "bg-pink-50")?;
        list.add_1("border-pink-200")?;
    }

    let event = match event {
        Some(event) => Some(event),
        None => js_sys::Reflect::get(&dom::window()?.into(), &"event".into())?
            .dyn_into::<Event>()
            .ok(),
    };
    if let Some(button) = event
        .and_then(|e| e.target())
        .and_then(|t| t.dyn_into::<Element>().ok())
    {
        let list = button.class_list();
        list.remove_1("border-pink-200")?;
        list.add_2("border-pink-600", "bg-pink-50")?;
    }
    Ok(())
}

/// Donation form submit.
#[wasm_bindgen(js_name = handleDonationSubmit)]
pub fn handle_donation_submit(event: Event) -> Result<(), JsValue> {
    event.prevent_default();
    let document = dom::document()?;
    let name = dom::input_value(&document, "donorName");
    let email = dom::input_value(&document, "donorEmail");
    let amount = dom::input_value(&document, "customAmount");
    let anonymous = document
        .get_element_by_id("anonymous")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .is_some_and(|input| input.checked());

    match forms::donation_ack(&Donation {
        name: &name,
        email: &email,
        amount: &amount,
        anonymous,
    }) {
        Ok(message) => {
            dom::alert(&message);
            close_modal()?;
            reset_form(&event);
        }
        Err(problem) => dom::alert(problem),
    }
    Ok(())
}

/// Volunteer form submit.
#[wasm_bindgen(js_name = handleVolunteerSubmit)]
pub fn handle_volunteer_submit(event: Event) -> Result<(), JsValue> {
    event.prevent_default();
    let document = dom::document()?;
    let name = dom::input_value(&document, "volunteerName");
    let email = dom::input_value(&document, "volunteerEmail");
    let interests = dom::query_all(&document, "input[name=\"interests\"]:checked")?.len();

    match forms::volunteer_ack(&name, &email, interests) {
        Ok(message) => {
            dom::alert(&message);
            close_modal()?;
            reset_form(&event);
        }
        Err(problem) => dom::alert(problem),
    }
    Ok(())
}

/// Installs the document-wide listeners: Enter in the search box searches,
/// Escape closes modals, and a click on a modal's backdrop closes it.
pub(crate) fn install(document: &Document) -> Result<(), JsValue> {
    dom::listen(document, "keypress", |event| {
        let Ok(key) = event.dyn_into::<KeyboardEvent>() else {
            return;
        };
        let on_search = key
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| el.id() == SEARCH_INPUT);
        if key.key() == "Enter" && on_search {
            let _ = perform_search();
        }
    })?;

    dom::listen(document, "keydown", |event| {
        if let Ok(key) = event.dyn_into::<KeyboardEvent>()
            && key.key() == "Escape"
        {
            let _ = close_modal();
        }
    })?;

    dom::listen(document, "click", |event| {
        // Only the overlay itself, not clicks bubbling up from its content.
        let on_backdrop = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|el| el.id().ends_with("Modal"));
        if on_backdrop {
            let _ = close_modal();
        }
    })
}
