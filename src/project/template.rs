//! Starter documents.

/// Document shown to new single-document users.
pub const DEFAULT_TEMPLATE: &str = r#"\documentclass{article}
\usepackage[utf8]{inputenc}
\usepackage{amsmath}
\usepackage{graphicx}

\title{LaTeX Document}
\author{Your Name}
\date{\today}

\begin{document}

\maketitle

\section{Introduction}

Welcome to the LaTeX editor. Edit this document to see the preview update.

\subsection{Features}

\begin{itemize}
    \item Live HTML preview
    \item Multi-file projects with \texttt{input}
    \item Download as .tex or as a project archive
\end{itemize}

\subsection{Mathematics}

\begin{equation}
    E = mc^2
\end{equation}

\begin{equation}
    \int_{-\infty}^{\infty} e^{-x^2} dx = \sqrt{\pi}
\end{equation}

\subsection{Code Examples}

\begin{verbatim}
function hello() {
    console.log("Hello, World!");
}
\end{verbatim}

\section{Conclusion}

Start creating documents with \textbf{LaTeX}!

\end{document}
"#;

/// Main file of a new multi-file project titled `title`.
pub(crate) fn starter_main(title: &str) -> String {
    format!(
        r"\documentclass{{article}}
\usepackage[utf8]{{inputenc}}
\usepackage{{amsmath}}
\usepackage{{graphicx}}

\title{{{title}}}
\author{{Your Name}}
\date{{\today}}

\begin{{document}}

\maketitle

\input{{sections/introduction}}

\end{{document}}
"
    )
}

/// Introduction section of a new multi-file project.
pub(crate) const STARTER_INTRODUCTION: &str = r"\section{Introduction}

This is your new LaTeX project. Edit this file or create new sections.

\subsection{Getting Started}

\begin{itemize}
    \item Add more sections with \texttt{input}
    \item Upload images to an \texttt{images/} folder
\end{itemize}
";

/// Turn a project slug into a title: `my-thesis` → `My Thesis`.
pub(crate) fn title_from_name(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        let c = if c == '-' { ' ' } else { c };
        if at_word_start && c.is_alphanumeric() {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_name() {
        assert_eq!(title_from_name("my-project"), "My Project");
        assert_eq!(title_from_name("thesis"), "Thesis");
        assert_eq!(title_from_name("a_b-c"), "A_b C");
    }

    #[test]
    fn test_starter_main_includes_introduction() {
        let main = starter_main("Demo");
        assert!(main.contains(r"\title{Demo}"));
        assert!(main.contains(r"\input{sections/introduction}"));
    }
}
