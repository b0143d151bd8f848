use axum::response::Html;

const ABOUT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <title>Aula - Acerca de</title>
</head>
<body>
    <h1>Aula</h1>
    <p>Registro académico de la escuela: cursos, alumnos, personal, notas,
    asistencias y comentarios.</p>
    <p>La API está documentada en <a href="/swagger-ui">/swagger-ui</a> y
    <a href="/scalar">/scalar</a>.</p>
</body>
</html>
"#;

/// Static about page. Needs no authentication.
#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "About page", content_type = "text/html", body = String)),
    tag = "Pages"
)]
pub async fn about() -> Html<&'static str> {
    Html(ABOUT_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_about_page_is_html() {
        let Html(body) = about().await;
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("<h1>Aula</h1>"));
    }
}
