use crud_test_bot::actions::Action;
use crud_test_bot::config::CrudOptions;
use crud_test_bot::framework::mock::{AuthEvent, MockAuthenticator, MockDirectory, MockUser};
use crud_test_bot::framework::{serde_attributes, Attributes, HasAttributeBag, Resource, ResourceSpec};
use crud_test_bot::runtime::{setup_tracing, Outcome, Suite};
use crud_test_bot::scenario::{BindingContext, ScenarioBinder};
use crud_test_bot::session::{SessionScope, UserRef};
use serde::Serialize;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct BlogPost {
    title: String,
    body: String,
    published: bool,
}

impl HasAttributeBag for BlogPost {
    fn attributes(&self) -> Attributes {
        serde_attributes(self)
    }
}

impl Resource for BlogPost {
    fn try_default() -> Result<Self, String> {
        Ok(Self::default())
    }

    fn attribute_bag(&self) -> Option<&dyn HasAttributeBag> {
        Some(self)
    }
}

type Lets = Arc<BindingContext<BlogPost, MockUser>>;

/// Full flow: generate, register with the suite, run every scenario as the
/// bound user inside its own session scope.
#[tokio::test]
async fn test_generate_and_run_as_user() {
    setup_tracing();

    let seen: Arc<Mutex<Vec<(Action, Attributes, Option<String>)>>> = Arc::default();
    let auth = MockAuthenticator::new();

    let sink = seen.clone();
    let worker_auth = auth.clone();
    let binder = ScenarioBinder::from_fn(move |action, lets: Lets| {
        let sink = sink.clone();
        let auth = worker_auth.clone();
        async move {
            let mut directory = MockDirectory::new();
            directory.expect_reload().return_ok(lets.user.clone());
            let mut scope = SessionScope::new(auth.clone(), directory);

            let signed_in_as = scope
                .run_as(UserRef::record(lets.user.clone()), |_| async { auth.current_email() })
                .await?;

            sink.lock()
                .unwrap()
                .push((action, lets.attribute_diff.clone(), signed_in_as));
            Ok(())
        }
    });

    let post = BlogPost {
        title: "Hello".into(),
        ..BlogPost::default()
    };
    let mut suite = Suite::new();
    let registered = binder.generate(
        &mut suite,
        post.into(),
        MockUser::persisted("alice@example.com"),
        &CrudOptions::default().only([Action::New, Action::Edit]).namespace("admin"),
    );
    assert_eq!(registered.len(), 2);

    let report = suite.run().await;
    assert!(report.is_success(), "{report:?}");
    assert_eq!(
        report.outcome("test_bot: #new alice@example.com"),
        Some(&Outcome::Passed)
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    for (i, action) in [Action::New, Action::Edit].into_iter().enumerate() {
        assert_eq!(seen[i].0, action);
        assert_eq!(seen[i].1.get("title"), Some(&json!("Hello")));
        assert_eq!(seen[i].1.len(), 1);
        assert_eq!(seen[i].2.as_deref(), Some("alice@example.com"));
    }

    // every session was closed
    assert_eq!(auth.current_email(), None);
    let sign_outs = auth.events().iter().filter(|e| **e == AuthEvent::SignOut).count();
    assert_eq!(sign_outs, 2);
}

/// A failing scenario body is reported against its own label and does not stop
/// the other scenarios.
#[tokio::test]
async fn test_failures_are_reported_per_action() {
    let binder = ScenarioBinder::from_fn(|action, _lets: Lets| async move {
        if action == Action::Destroy {
            return Err("destroy link not found".into());
        }
        Ok(())
    });

    let mut suite = Suite::new();
    binder.generate(
        &mut suite,
        ResourceSpec::Type,
        MockUser::persisted("bob@example.com"),
        &CrudOptions::default(),
    );
    let report = suite.run().await;

    assert_eq!(report.outcomes.len(), 7);
    assert_eq!(report.failed(), 1);
    assert_eq!(
        report.outcome("test_bot: #destroy bob@example.com"),
        Some(&Outcome::Failed("destroy link not found".into()))
    );
}
