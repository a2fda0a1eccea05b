//! Languages accepted by the repository search filter

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

macro_rules! languages {
    ($($variant:ident => $display:literal, $qualifier:literal $(, [$($alias:literal),*])?;)*) => {
        /// Programming languages recognised by the search filter
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Language {
            $($variant,)*
        }

        impl Language {
            /// Every recognised language
            pub const ALL: &'static [Language] = &[$(Language::$variant,)*];

            /// Canonical display name
            pub fn name(&self) -> &'static str {
                match self {
                    $(Language::$variant => $display,)*
                }
            }

            /// Token used in a `language:` search qualifier
            pub fn qualifier(&self) -> &'static str {
                match self {
                    $(Language::$variant => $qualifier,)*
                }
            }

            fn aliases(&self) -> &'static [&'static str] {
                match self {
                    $(Language::$variant => &[$($($alias),*)?],)*
                }
            }
        }
    };
}

languages! {
    Abap => "ABAP", "abap";
    ActionScript => "ActionScript", "actionscript", ["as3"];
    Ada => "Ada", "ada", ["ada95", "ada2005"];
    Agda => "Agda", "agda";
    Alloy => "Alloy", "alloy";
    AngelScript => "AngelScript", "angelscript";
    Antlr => "ANTLR", "antlr";
    ApacheConf => "ApacheConf", "apacheconf", ["apache"];
    Apex => "Apex", "apex";
    Apl => "APL", "apl";
    AppleScript => "AppleScript", "applescript", ["osascript"];
    Arc => "Arc", "arc";
    Arduino => "Arduino", "arduino", ["ino"];
    AspNet => "ASP.NET", "asp.net", ["aspx", "aspx-vb"];
    Assembly => "Assembly", "assembly", ["asm", "nasm"];
    Astro => "Astro", "astro";
    AutoHotkey => "AutoHotkey", "autohotkey", ["ahk"];
    AutoIt => "AutoIt", "autoit", ["autoit3"];
    Awk => "Awk", "awk";
    Ballerina => "Ballerina", "ballerina";
    Batchfile => "Batchfile", "batchfile", ["bat", "batch", "dosbatch"];
    Bicep => "Bicep", "bicep";
    BitBake => "BitBake", "bitbake";
    BlitzBasic => "BlitzBasic", "blitzbasic", ["b3d", "blitz3d", "blitzplus"];
    Boo => "Boo", "boo";
    Brainfuck => "Brainfuck", "brainfuck", ["bf"];
    C => "C", "c";
    CSharp => "C#", "csharp", ["c-sharp", "cs"];
    Cpp => "C++", "cpp", ["c-plus-plus", "cplusplus"];
    Cairo => "Cairo", "cairo";
    CapnProto => "Cap'n Proto", "cap'n-proto", ["capnp"];
    Ceylon => "Ceylon", "ceylon";
    Chapel => "Chapel", "chapel", ["chpl"];
    Cirru => "Cirru", "cirru";
    Clarion => "Clarion", "clarion";
    ClassicAsp => "Classic ASP", "classic-asp", ["asp"];
    Clean => "Clean", "clean";
    Clojure => "Clojure", "clojure";
    Cmake => "CMake", "cmake";
    Cobol => "COBOL", "cobol";
    CoffeeScript => "CoffeeScript", "coffeescript", ["coffee", "coffee-script"];
    ColdFusion => "ColdFusion", "coldfusion", ["cfm", "cfml"];
    CommonLisp => "Common Lisp", "common-lisp", ["lisp"];
    ComponentPascal => "Component Pascal", "component-pascal";
    Coq => "Coq", "coq";
    Crystal => "Crystal", "crystal";
    Css => "CSS", "css";
    Cuda => "Cuda", "cuda";
    Cython => "Cython", "cython", ["pyrex"];
    D => "D", "d", ["dlang"];
    Dart => "Dart", "dart";
    Dhall => "Dhall", "dhall";
    Dockerfile => "Dockerfile", "dockerfile", ["docker", "containerfile"];
    Dylan => "Dylan", "dylan";
    Ecl => "ECL", "ecl";
    Eiffel => "Eiffel", "eiffel";
    Elixir => "Elixir", "elixir", ["ex"];
    Elm => "Elm", "elm";
    EmacsLisp => "Emacs Lisp", "emacs-lisp", ["elisp", "emacs"];
    Erlang => "Erlang", "erlang";
    FSharp => "F#", "fsharp", ["f-sharp"];
    Factor => "Factor", "factor";
    Fancy => "Fancy", "fancy";
    Fantom => "Fantom", "fantom";
    Fennel => "Fennel", "fennel";
    Forth => "Forth", "forth";
    Fortran => "Fortran", "fortran";
    FreeMarker => "FreeMarker", "freemarker", ["ftl"];
    Frege => "Frege", "frege";
    GameMakerLanguage => "Game Maker Language", "game-maker-language", ["gml"];
    Gap => "GAP", "gap";
    GdScript => "GDScript", "gdscript";
    Genie => "Genie", "genie";
    Gherkin => "Gherkin", "gherkin", ["cucumber"];
    Gleam => "Gleam", "gleam";
    Glsl => "GLSL", "glsl";
    Gnuplot => "Gnuplot", "gnuplot";
    Go => "Go", "go", ["golang"];
    Gosu => "Gosu", "gosu";
    Graphql => "GraphQL", "graphql";
    Groovy => "Groovy", "groovy";
    Hack => "Hack", "hack";
    Handlebars => "Handlebars", "handlebars", ["hbs", "htmlbars"];
    Harbour => "Harbour", "harbour";
    Haskell => "Haskell", "haskell";
    Haxe => "Haxe", "haxe";
    Hcl => "HCL", "hcl", ["terraform"];
    Hlsl => "HLSL", "hlsl";
    Html => "HTML", "html", ["xhtml"];
    Hy => "Hy", "hy", ["hylang"];
    Idl => "IDL", "idl";
    Idris => "Idris", "idris";
    Inform7 => "Inform 7", "inform-7", ["i7", "inform7"];
    Io => "Io", "io";
    Ioke => "Ioke", "ioke";
    Isabelle => "Isabelle", "isabelle";
    J => "J", "j";
    Janet => "Janet", "janet";
    Java => "Java", "java";
    JavaScript => "JavaScript", "javascript", ["js", "node"];
    Jsonnet => "Jsonnet", "jsonnet";
    Julia => "Julia", "julia";
    JupyterNotebook => "Jupyter Notebook", "jupyter-notebook", ["jupyter", "ipynb"];
    Kotlin => "Kotlin", "kotlin";
    Lasso => "Lasso", "lasso", ["lassoscript"];
    Less => "Less", "less";
    LiveScript => "LiveScript", "livescript", ["live-script", "ls"];
    Llvm => "LLVM", "llvm";
    Logos => "Logos", "logos";
    Logtalk => "Logtalk", "logtalk";
    LookMl => "LookML", "lookml";
    Lua => "Lua", "lua";
    Makefile => "Makefile", "makefile", ["make", "bsdmake", "mf"];
    Mako => "Mako", "mako";
    Markdown => "Markdown", "markdown", ["md", "pandoc"];
    Mathematica => "Mathematica", "mathematica", ["mma", "wolfram"];
    Matlab => "MATLAB", "matlab", ["octave"];
    Max => "Max", "max", ["max/msp", "maxmsp"];
    Mercury => "Mercury", "mercury";
    Meson => "Meson", "meson";
    Mirah => "Mirah", "mirah";
    Modelica => "Modelica", "modelica";
    Modula2 => "Modula-2", "modula-2";
    Modula3 => "Modula-3", "modula-3";
    Move => "Move", "move";
    Mql4 => "MQL4", "mql4";
    Mql5 => "MQL5", "mql5";
    Mustache => "Mustache", "mustache";
    Nemerle => "Nemerle", "nemerle";
    NesC => "nesC", "nesc";
    NetLogo => "NetLogo", "netlogo";
    NewLisp => "NewLisp", "newlisp";
    Nextflow => "Nextflow", "nextflow";
    Nginx => "Nginx", "nginx", ["nginx-configuration-file"];
    Nim => "Nim", "nim";
    Nit => "Nit", "nit";
    Nix => "Nix", "nix", ["nixos"];
    Nsis => "NSIS", "nsis";
    Nu => "Nu", "nu", ["nush"];
    Nushell => "Nushell", "nushell", ["nu-script"];
    ObjectiveC => "Objective-C", "objective-c", ["objectivec", "objc", "obj-c"];
    ObjectiveCpp => "Objective-C++", "objective-c++", ["objectivec++", "objc++", "obj-c++"];
    ObjectiveJ => "Objective-J", "objective-j", ["objectivej", "objj", "obj-j"];
    OCaml => "OCaml", "ocaml";
    Odin => "Odin", "odin";
    Omgrofl => "Omgrofl", "omgrofl";
    Ooc => "ooc", "ooc";
    Opa => "Opa", "opa";
    OpenEdgeAbl => "OpenEdge ABL", "openedge-abl", ["progress", "openedge", "abl"];
    OpenScad => "OpenSCAD", "openscad";
    Ox => "Ox", "ox";
    Oxygene => "Oxygene", "oxygene";
    Oz => "Oz", "oz";
    Pascal => "Pascal", "pascal", ["delphi", "objectpascal"];
    Pawn => "Pawn", "pawn";
    Perl => "Perl", "perl", ["cperl"];
    Php => "PHP", "php", ["inc"];
    Pike => "Pike", "pike";
    PlPgSql => "PLpgSQL", "plpgsql";
    PlSql => "PLSQL", "plsql";
    PogoScript => "PogoScript", "pogoscript";
    Pony => "Pony", "pony";
    PostScript => "PostScript", "postscript", ["postscr"];
    PowerBuilder => "PowerBuilder", "powerbuilder";
    PowerShell => "PowerShell", "powershell", ["posh", "pwsh"];
    Processing => "Processing", "processing";
    Prolog => "Prolog", "prolog";
    Puppet => "Puppet", "puppet";
    PureBasic => "PureBasic", "purebasic";
    PureScript => "PureScript", "purescript";
    Python => "Python", "python", ["py", "python3"];
    Q => "q", "q";
    QSharp => "Q#", "qsharp";
    Qml => "QML", "qml";
    R => "R", "r", ["rscript", "splus"];
    Racket => "Racket", "racket";
    Ragel => "Ragel", "ragel", ["ragel-rb", "ragel-ruby"];
    Raku => "Raku", "raku", ["perl6", "perl-6"];
    Reason => "Reason", "reason";
    Rebol => "Rebol", "rebol";
    Red => "Red", "red", ["red/system"];
    Rescript => "ReScript", "rescript";
    Rexx => "REXX", "rexx", ["arexx"];
    RobotFramework => "RobotFramework", "robotframework";
    Ruby => "Ruby", "ruby", ["rb", "jruby", "macruby", "rake", "rbx"];
    Rust => "Rust", "rust", ["rs"];
    Sas => "SAS", "sas";
    Sass => "Sass", "sass";
    Scala => "Scala", "scala";
    Scheme => "Scheme", "scheme";
    Scilab => "Scilab", "scilab";
    Scss => "SCSS", "scss";
    SelfLang => "Self", "self";
    Shell => "Shell", "shell", ["bash", "sh", "shell-script", "zsh"];
    Slim => "Slim", "slim";
    Smali => "Smali", "smali";
    Smalltalk => "Smalltalk", "smalltalk", ["squeak"];
    Smarty => "Smarty", "smarty";
    Solidity => "Solidity", "solidity";
    SourcePawn => "SourcePawn", "sourcepawn", ["sourcemod"];
    Sql => "SQL", "sql";
    SqlPl => "SQLPL", "sqlpl";
    Squirrel => "Squirrel", "squirrel";
    Stan => "Stan", "stan";
    StandardMl => "Standard ML", "standard-ml", ["sml"];
    Starlark => "Starlark", "starlark", ["bazel", "bzl"];
    Stylus => "Stylus", "stylus";
    SuperCollider => "SuperCollider", "supercollider";
    Svelte => "Svelte", "svelte";
    Swift => "Swift", "swift";
    SystemVerilog => "SystemVerilog", "systemverilog";
    Tcl => "Tcl", "tcl";
    Tex => "TeX", "tex", ["latex"];
    Terra => "Terra", "terra";
    Thrift => "Thrift", "thrift";
    Tsql => "TSQL", "tsql";
    Twig => "Twig", "twig";
    TypeScript => "TypeScript", "typescript", ["ts"];
    UnrealScript => "UnrealScript", "unrealscript";
    V => "V", "v", ["vlang"];
    Vala => "Vala", "vala";
    Vbscript => "VBScript", "vbscript";
    Vcl => "VCL", "vcl";
    Verilog => "Verilog", "verilog";
    Vhdl => "VHDL", "vhdl";
    VimScript => "Vim Script", "vim-script", ["vimscript", "viml", "vim"];
    VisualBasic => "Visual Basic .NET", "visual-basic-.net", ["vb", "vbnet", "visualbasic", "vb.net"];
    Volt => "Volt", "volt";
    Vue => "Vue", "vue";
    WebAssembly => "WebAssembly", "webassembly", ["wasm", "wast"];
    Wgsl => "WGSL", "wgsl";
    Xbase => "xBase", "xbase", ["clipper", "foxpro"];
    Xc => "XC", "xc";
    Xojo => "Xojo", "xojo";
    XProc => "XProc", "xproc";
    XQuery => "XQuery", "xquery";
    Xslt => "XSLT", "xslt", ["xsl"];
    Xtend => "Xtend", "xtend";
    Yacc => "Yacc", "yacc";
    Yaml => "YAML", "yaml", ["yml"];
    Yara => "YARA", "yara";
    Zap => "ZAP", "zap";
    Zig => "Zig", "zig";
    Zil => "ZIL", "zil";
    Zimpl => "Zimpl", "zimpl";
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| {
                lang.name().eq_ignore_ascii_case(wanted)
                    || lang.qualifier().eq_ignore_ascii_case(wanted)
                    || lang.aliases().iter().any(|a| a.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| Error::InvalidFilter {
                field: "language",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
