use yew::prelude::*;

use crate::hooks::{use_auth, use_auth_methods};

/// Actions the navigation bar can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavControl {
    CreatePost,
    SignOut,
    Login,
    SignUp,
}

pub fn nav_controls(signed_in: bool, username_password_enabled: bool) -> Vec<NavControl> {
    if signed_in {
        vec![NavControl::CreatePost, NavControl::SignOut]
    } else if username_password_enabled {
        vec![NavControl::Login, NavControl::SignUp]
    } else {
        vec![NavControl::Login]
    }
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let auth = use_auth();
    let auth_methods = use_auth_methods();
    let controls = nav_controls(auth.is_signed_in(), auth_methods.username_password_enabled());

    let on_sign_out = auth.sign_out.reform(|_: MouseEvent| ());

    html! {
        <nav class="app-nav">
            <a href="/" class="brand">
                <h1>{"Share Me"}</h1>
            </a>
            <div class="spacer"></div>
            <div class="nav-actions">
                { for controls.into_iter().map(|control| render_control(control, &on_sign_out)) }
            </div>
        </nav>
    }
}

fn render_control(control: NavControl, on_sign_out: &Callback<MouseEvent>) -> Html {
    match control {
        NavControl::CreatePost => html! {
            <a href="/" class="btn btn-gradient" key="create-post">
                <span class="icon">{"➕"}</span>
                <span class="label-wide">{"Create Post"}</span>
                <span class="label-narrow">{"Post"}</span>
            </a>
        },
        NavControl::SignOut => html! {
            <button class="btn-icon" title="Sign out" onclick={on_sign_out.clone()} key="sign-out">
                {"⎋"}
            </button>
        },
        NavControl::Login => html! {
            <a href="/login" class="btn btn-gradient" key="login">{"Login"}</a>
        },
        NavControl::SignUp => html! {
            <a href="/sign-up" class="btn btn-outline" key="sign-up">{"Sign Up"}</a>
        },
    }
}
