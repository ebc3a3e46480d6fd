//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::access_denied::AccessDenied;
use crate::components::auth_gate::AuthGate;
use crate::pages::sign_in::SignInPage;
use crate::pages::subscription_success::SubscriptionSuccessPage;
use crate::routes::AppRoute;
use crate::state::auth_context::AuthContext;
use crate::util::auth::provide_auth_context;

/// Root application component.
///
/// Receives the process-wide auth context from the entrypoint and provides
/// it to every route. Each page is wrapped in `AuthGate` keyed by its route.
#[component]
pub fn App(auth: AuthContext) -> impl IntoView {
    provide_auth_context(auth);

    view! {
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=StaticSegment("sign-in")
                    view=|| view! { <AuthGate route=AppRoute::SignIn><SignInPage/></AuthGate> }
                />
                <Route
                    path=StaticSegment("subscription-success")
                    view=|| {
                        view! {
                            <AuthGate route=AppRoute::SubscriptionSuccess>
                                <SubscriptionSuccessPage/>
                            </AuthGate>
                        }
                    }
                />
                <Route
                    path=StaticSegment("access-denied")
                    view=|| view! { <AuthGate route=AppRoute::AccessDenied><AccessDenied/></AuthGate> }
                />
            </Routes>
        </Router>
    }
}
