//! Portfolio showcase app hosted by the desktop shell.
//!
//! The app owns its window chrome and reports pointer interaction, minimize, and close back to
//! the shell through the injected [`WindowCallbacks`]. Page navigation stays local to the app.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{AppMountContext, WindowCallbacks};
use leptos::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Pages reachable inside the showcase window.
pub enum ShowcasePage {
    /// Landing page with the navigation icons.
    #[default]
    Home,
    /// Short biography.
    About,
    /// Work history.
    Experience,
    /// Selected projects.
    Projects,
    /// Contact details.
    Contact,
}

impl ShowcasePage {
    /// Pages linked from the home page, in display order.
    pub const NAVIGATION: [Self; 4] = [Self::Projects, Self::Experience, Self::About, Self::Contact];

    fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    /// Human-readable page title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Experience => "Experience",
            Self::Projects => "Portfolio",
            Self::Contact => "Contact",
        }
    }

    fn icon_url(self) -> String {
        let icon = match self {
            Self::Projects => "portfolio",
            other => other.slug(),
        };
        format!("/assets/icons/{icon}.png")
    }
}

/// Mount function registered with the shell's app table.
pub fn mount_showcase(context: AppMountContext) -> View {
    view! {
        <ShowcaseExplorer
            title=context.title
            icon_id=context.icon_id
            callbacks=context.callbacks
            is_focused=context.is_focused
        />
    }
    .into_view()
}

#[component]
/// Showcase window: title bar plus the currently selected page.
pub fn ShowcaseExplorer(
    /// Window title from the registry.
    title: String,
    /// Registry icon id for the title bar.
    icon_id: String,
    /// Lifecycle callbacks bound to the hosting window.
    callbacks: WindowCallbacks,
    /// Whether the hosting window is on top.
    is_focused: Signal<bool>,
) -> impl IntoView {
    let page = create_rw_signal(ShowcasePage::Home);
    let navigate = Callback::new(move |next: ShowcasePage| page.set(next));

    view! {
        <section
            class=move || {
                if is_focused.get() { "showcase-window focused" } else { "showcase-window" }
            }
            role="dialog"
            aria-label=title.clone()
            on:pointerdown=move |_| callbacks.interact()
        >
            <header class="showcase-titlebar">
                <img
                    class="showcase-titlebar-icon"
                    src=format!("/assets/icons/{icon_id}.png")
                    alt=""
                />
                <span class="showcase-titlebar-text">
                    {move || format!("{title} - {}", page.get().title())}
                </span>
                <div class="showcase-titlebar-controls">
                    <button
                        class="showcase-titlebar-button"
                        aria-label="Minimize"
                        on:click=move |_| callbacks.minimize()
                    >
                        "_"
                    </button>
                    <button
                        class="showcase-titlebar-button"
                        aria-label="Close"
                        on:click=move |_| callbacks.close()
                    >
                        "X"
                    </button>
                </div>
            </header>
            <nav class="showcase-toolbar">
                <Show when=move || page.get() != ShowcasePage::Home fallback=|| ()>
                    <button on:click=move |_| navigate.call(ShowcasePage::Home)>"Home"</button>
                </Show>
            </nav>
            <div class="showcase-page">
                {move || match page.get() {
                    ShowcasePage::Home => view! { <HomePage navigate=navigate /> }.into_view(),
                    other => view! { <TextPage page=other /> }.into_view(),
                }}
            </div>
        </section>
    }
}

#[component]
fn HomePage(navigate: Callback<ShowcasePage>) -> impl IntoView {
    view! {
        <div class="showcase-home">
            <div class="showcase-home-header">
                <h1 class="showcase-home-name">"Tymoshenko Production"</h1>
                <h2>"Motion Designer and Web Developer"</h2>
            </div>
            <div class="showcase-home-links">
                {ShowcasePage::NAVIGATION
                    .into_iter()
                    .map(|target| {
                        view! {
                            <button
                                class="showcase-home-link"
                                title=target.title()
                                on:click=move |_| navigate.call(target)
                            >
                                <img src=target.icon_url() alt=target.title() />
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

fn page_paragraphs(page: ShowcasePage) -> &'static [&'static str] {
    match page {
        ShowcasePage::Home => &[],
        ShowcasePage::About => &[
            "Motion designer and web developer building playful interfaces.",
            "This desktop is itself a portfolio piece.",
        ],
        ShowcasePage::Experience => &[
            "Freelance motion design for brands and studios.",
            "Front-end development for interactive sites.",
        ],
        ShowcasePage::Projects => &[
            "Retro desktop portfolio.",
            "Animated product explainers.",
        ],
        ShowcasePage::Contact => &["Reach out through the links on the home page."],
    }
}

#[component]
fn TextPage(page: ShowcasePage) -> impl IntoView {
    view! {
        <article class="showcase-text-page">
            <h1>{page.title()}</h1>
            {page_paragraphs(page)
                .iter()
                .map(|text| view! { <p>{*text}</p> })
                .collect_view()}
        </article>
    }
}
