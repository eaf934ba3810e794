use crud_test_bot::actions::{Action, ActionSet};
use crud_test_bot::config::CrudOptions;
use crud_test_bot::framework::mock::MockUser;
use crud_test_bot::framework::{serde_attributes, Attributes, HasAttributeBag, Resource, ResourceSpec};
use crud_test_bot::resource::resolve;
use crud_test_bot::runtime::Suite;
use crud_test_bot::scenario::{BindingContext, ScenarioBinder};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct Post {
    title: String,
    published: bool,
    views: u32,
}

impl HasAttributeBag for Post {
    fn attributes(&self) -> Attributes {
        serde_attributes(self)
    }
}

impl Resource for Post {
    fn try_default() -> Result<Self, String> {
        Ok(Self::default())
    }

    fn attribute_bag(&self) -> Option<&dyn HasAttributeBag> {
        Some(self)
    }
}

#[derive(Clone, Debug)]
struct Order;

impl Resource for Order {
    fn try_default() -> Result<Self, String> {
        Err("orders need a customer".into())
    }
}

fn binder<R: Resource>() -> ScenarioBinder<R, MockUser> {
    ScenarioBinder::from_fn(|_, _: Arc<BindingContext<R, MockUser>>| async { Ok(()) })
}

#[test]
fn test_no_op_overrides_collapse_out_of_the_diff() {
    let post = Post {
        title: "Hello".into(),
        published: false,
        views: 3,
    };
    let resolved = resolve(ResourceSpec::from(post)).unwrap();

    let expected: Attributes = [
        ("title".to_string(), json!("Hello")),
        ("views".to_string(), json!(3)),
    ]
    .into_iter()
    .collect();
    assert_eq!(resolved.attribute_diff, expected);
}

#[test]
fn test_scenario_count_matches_action_set() {
    let option_sets = [
        CrudOptions::default(),
        CrudOptions::default().only([Action::Index]),
        CrudOptions::default().except([Action::New, Action::Create]),
        CrudOptions::default().only([]),
    ];

    for options in option_sets {
        let expected = ActionSet::resolve(&options);
        let scenarios = binder::<Post>()
            .try_bind(ResourceSpec::Type, MockUser::persisted("a@b.c"), &options)
            .unwrap();
        assert_eq!(scenarios.len(), expected.len());
        let actions: Vec<_> = scenarios.iter().map(|s| s.action()).collect();
        assert_eq!(actions, expected.as_slice());
    }
}

/// One resource failing to construct must not affect the rest of a batch.
#[test]
fn test_batch_survives_an_uninstantiable_type() {
    let mut suite = Suite::new();
    let user = MockUser::persisted("alice@example.com");

    let first = binder::<Post>().generate(&mut suite, ResourceSpec::Type, user.clone(), &CrudOptions::default());
    let broken = binder::<Order>().generate(&mut suite, ResourceSpec::Type, user.clone(), &CrudOptions::default());
    let last = binder::<Post>().generate(
        &mut suite,
        ResourceSpec::Type,
        user,
        &CrudOptions::default().only([Action::Show]),
    );

    assert_eq!(first.len(), 7);
    assert!(broken.is_empty());
    assert_eq!(last.len(), 1);
    assert_eq!(suite.len(), 8);
}

#[test]
fn test_options_from_config_map() {
    let mut suite = Suite::new();
    let registered = binder::<Post>().generate_from_config(
        &mut suite,
        ResourceSpec::Type,
        MockUser::persisted("alice@example.com"),
        &json!({ "only": [["new", null], "destroy", "archive"] }),
    );

    let actions: Vec<_> = registered.iter().map(|i| i.action).collect();
    assert_eq!(actions, vec![Action::New, Action::Destroy]);
}
