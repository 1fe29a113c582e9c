#![allow(clippy::expect_used, reason = "Fine in tests")]
use markdown_filter::{
  FILTER_ALIAS,
  FILTER_NAME,
  FilterError,
  MarkdownFilterOptions,
  TemplateOptions,
  create_standalone,
};
use markdown_filter_render::RenderError;

fn render(options: &TemplateOptions, source: &str) -> String {
  options
    .render(source, &options.context())
    .expect("template should render")
}

#[test]
fn test_heading() {
  let (_filter, options) = create_standalone(None).expect("should build");

  let html = render(&options, "{{ '# Hi' | markdown }}");
  assert!(html.contains("<h1"));
  assert!(html.contains("Hi"));
}

#[test]
fn test_empty_input_renders_nothing() {
  let (_filter, options) = create_standalone(None).expect("should build");
  assert_eq!(render(&options, "{{ '' | markdown }}"), "");
}

#[test]
fn test_undefined_input_renders_nothing() {
  let (_filter, options) = create_standalone(None).expect("should build");
  assert_eq!(render(&options, "{{ missing | markdown }}"), "");
}

#[test]
fn test_alias_behaves_like_primary_name() {
  let (_filter, options) = create_standalone(None).expect("should build");

  let primary = render(&options, "{{ '*x* and ~~y~~' | markdown }}");
  let alias = render(&options, "{{ '*x* and ~~y~~' | markdownify }}");
  assert_eq!(primary, alias);
  assert!(alias.contains("<em>x</em>"));
  assert!(alias.contains("<del>y</del>"));
}

#[test]
fn test_arguments_are_ignored() {
  let (_filter, options) = create_standalone(None).expect("should build");

  assert_eq!(
    render(&options, "{{ '**b**' | markdown('extra', 1) }}"),
    render(&options, "{{ '**b**' | markdown }}")
  );
}

#[test]
fn test_context_values_are_rendered() {
  let (_filter, options) = create_standalone(None).expect("should build");
  let mut context = options.context();
  context.set_value("body", &"- one\n- two\n");

  let html = options
    .render("{{ body | markdown }}", &context)
    .expect("template should render");
  assert!(html.contains("<li>one</li>"));
  assert!(html.contains("<li>two</li>"));
}

#[test]
fn test_output_is_plain_text_when_escaping() {
  let (_filter, mut options) = create_standalone(None).expect("should build");
  options.auto_escape = true;

  let html = render(&options, "{{ '**b**' | markdown }}");
  assert!(html.contains("&lt;strong&gt;b"));
  assert!(!html.contains("<strong>"));
}

#[test]
fn test_custom_pipeline() {
  let (filter, options) =
    create_standalone(Some(MarkdownFilterOptions::commonmark()))
      .expect("should build");

  assert!(filter.renderer().pipeline().features().enabled().is_empty());
  assert!(!render(&options, "{{ '~~s~~' | markdown }}").contains("<del>"));
}

#[test]
fn test_missing_pipeline_fails() {
  let err = create_standalone(Some(MarkdownFilterOptions {
    configure_pipeline: None,
  }))
  .expect_err("absent pipeline transformation must fail");

  assert!(matches!(
    err,
    FilterError::Render(RenderError::InvalidConfiguration(_))
  ));
}

#[test]
fn test_factories_are_independent() {
  let (first_filter, mut first) =
    create_standalone(None).expect("should build");
  let (second_filter, second) = create_standalone(None).expect("should build");

  assert!(!std::sync::Arc::ptr_eq(&first_filter, &second_filter));

  first.filters.remove(FILTER_NAME);
  assert!(!first.filters.contains(FILTER_NAME));
  assert!(first.filters.contains(FILTER_ALIAS));
  assert!(second.filters.contains(FILTER_NAME));
  assert!(second.filters.contains(FILTER_ALIAS));

  let err = first
    .render("{{ 'x' | markdown }}", &first.context())
    .expect_err("unregistered filter should fail");
  assert!(matches!(err, FilterError::Template(_)));
  assert!(render(&second, "{{ 'x' | markdown }}").contains("<p>x</p>"));
}

#[test]
fn test_template_errors_are_not_intercepted() {
  let (_filter, options) = create_standalone(None).expect("should build");

  let err = options
    .render("{{ 'x' | markdown ", &options.context())
    .expect_err("unterminated expression should fail");
  assert!(matches!(err, FilterError::Template(_)));
}

#[test]
fn test_environment_shared_across_threads() {
  let (_filter, options) = create_standalone(None).expect("should build");
  let env = options.environment();

  std::thread::scope(|scope| {
    let handles: Vec<_> = (0..4)
      .map(|i| {
        let env = &env;
        scope.spawn(move || {
          env
            .render_str("{{ text | markdown }}", minijinja::context! {
              text => format!("**{i}**"),
            })
            .expect("template should render")
        })
      })
      .collect();

    for (i, handle) in handles.into_iter().enumerate() {
      let html = handle.join().expect("thread should not panic");
      assert!(html.contains(&format!("<strong>{i}</strong>")));
    }
  });
}
