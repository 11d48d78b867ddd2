use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("scrape")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract HTML elements using an XPath query or CSS3 selector")
        .arg(clap::arg!([HTML] "HTML file or http(s) URL; reads standard input when omitted"))
        .arg(clap::arg!(-a --argument <NAME> "Print the value of this attribute for each matched element"))
        .arg(clap::arg!(-b --body "Wrap output in HTML and BODY tags"))
        .arg(
            clap::arg!(-e --expression <EXPRESSION> "XPath query or CSS3 selector (repeatable)")
                .action(clap::ArgAction::Append),
        )
        .arg(
            clap::arg!(-x --"check-existence" "Exit with 0 if the first expression matches, 1 otherwise")
                .alias("check_existence"),
        )
        .arg(clap::arg!(-r --rawinput "Parse input as XML, without HTML error recovery"))
        .arg(clap::arg!(-t --text "Output the visible text of matches instead of markup"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "scrape", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "scrape", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "scrape", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "scrape", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
