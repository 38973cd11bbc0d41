//! HTML for the content listing

use h5p_kit::{ContentId, html};

use crate::examples::ExampleRegistry;

/// The start page: every stored package with play and edit links, followed
/// by the registered examples when there are any
pub fn index_page(content_ids: &[ContentId], examples: &ExampleRegistry) -> String {
    let items: String = content_ids
        .iter()
        .map(|id| {
            let query = urlencoding::encode(id.as_str());
            format!(
                "<li>{} <a href=\"/play?contentId={query}\">[play]</a> \
                 <a href=\"/edit?contentId={query}\">[edit]</a></li>",
                html::escape(id.as_str())
            )
        })
        .collect();

    format!(
        "<html>\n<head>\n<meta charset=\"UTF-8\">\n</head>\n<body>\n\n\
         <h4>Existing Content</h4>\n\n\
         <ul>\n{items}\n</ul>\n\n\
         <h4><a href=\"/edit\">Create New Content</a></h4>\n\
         {}</body>\n</html>",
        example_list(examples)
    )
}

fn example_list(examples: &ExampleRegistry) -> String {
    if examples.is_empty() {
        return String::new();
    }

    let items: String = examples
        .iter()
        .map(|(key, entry)| {
            format!(
                "<li class=\"example\"><a href=\"/examples/{key}\">{}</a></li>\n",
                html::escape(entry.title.as_deref().unwrap_or(key))
            )
        })
        .collect();

    format!("\n<h4>Examples</h4>\n\n<ul>\n{items}</ul>\n")
}
