use super::java_string;
use crate::context::GenerationContext;
use scaffold_spec::ModuleSpec;

pub(crate) fn render_controller(ctx: &GenerationContext) -> String {
    format!(
        "package {pkg};

import org.springframework.stereotype.Controller;
import org.springframework.ui.Model;
import org.springframework.web.bind.annotation.GetMapping;

@Controller
public class HomeController {{

    @GetMapping(\"/\")
    public String home(Model model) {{
        model.addAttribute(\"title\", {title});
        return \"home\";
    }}
}}
",
        pkg = ctx.base_package,
        title = java_string(&ctx.project_name),
    )
}

pub(crate) fn render_view(modules: &[ModuleSpec]) -> String {
    let links: String = modules
        .iter()
        .map(|m| {
            format!(
                "        <li><a th:href=\"@{{/{}}}\">{}</a></li>\n",
                m.route_segment(),
                m.display_label()
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>
<html xmlns:th=\"http://www.thymeleaf.org\">
<head>
    <meta charset=\"UTF-8\" />
    <title th:text=\"${{title}}\">Home</title>
    <link rel=\"stylesheet\" th:href=\"@{{/css/app.css}}\" />
</head>
<body>
<main class=\"container\">
    <h1 th:text=\"${{title}}\">Home</h1>
    <ul class=\"modules\">
{links}    </ul>
</main>
</body>
</html>
"
    )
}
