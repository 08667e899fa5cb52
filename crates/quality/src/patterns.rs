//! Pattern tables for the content classifier.
//!
//! All regular expressions are matched against the trimmed, lowercased
//! text. Tables are plain data: `(rule name, pattern)` pairs compiled once
//! when a [`ContentClassifier`](crate::ContentClassifier) is built.
//!
//! Content on the platform is mostly Spanish with some English, so every
//! table carries both.

/// Exact-match filler. Any hit ends classification at confidence 100.
pub const CRITICAL_PATTERNS: &[(&str, &str)] = &[
    (
        "test_word",
        r"^(test|testing|tests|prueba|pruebas|probando|asdf+|qwerty|foo|bar|foobar|baz|demo|sample|ejemplo|example|todo|tbd|tba|n/?a|null|undefined|none|nan|placeholder|dummy|xx+|abc|abcd|123+|1234+)[.!]*$",
    ),
    ("lorem_ipsum", r"lorem ipsum|dolor sit amet"),
    ("bracket_placeholder", r"^\[[^\]]*\]$"),
    ("brace_placeholder", r"^\{\{?[^}]*\}?\}$"),
    ("angle_placeholder", r"^<[^>]*>$"),
    (
        "inline_placeholder",
        r"\[(insert|inserte|insertar|your|tu|su|nombre|name|company|empresa|aqu[ií]|here|escribe|write|texto|text)[^\]]*\]",
    ),
    ("punctuation_run", r"^[-.…_*#!?¿¡,;:~=+/\\ ]+$"),
];

/// Strong placeholder signals short of certainty.
pub const HIGH_PATTERNS: &[(&str, &str)] = &[
    (
        "keyboard_mash",
        r"^[asdfghjklñ]{3,}$|^[qwertyuiop]{4,}$|^[zxcvbnm]{3,}$",
    ),
    (
        "single_generic_word",
        r"^(hola|hello|hi|hey|info|informaci[oó]n|information|texto|text|contenido|content|descripci[oó]n|description|pol[ií]tica|policy|nada|nothing|ok|okay|vale|s[ií]|yes|no|algo|something|varios|general|pendiente|ninguno|ninguna)[.!?]*$",
    ),
    ("numeric_only", r"^[0-9\s.,]+$"),
];

/// Weak signals: unfinished or deferred content.
pub const SUSPICIOUS_PATTERNS: &[(&str, &str)] = &[
    (
        "coming_soon",
        r"coming soon|pr[oó]ximamente|en construcci[oó]n|under construction|por definir|to be (defined|determined|added)|por completar|pendiente de|work in progress|\bwip\b|fill (this|me|in)|rellenar|completar (despu[eé]s|luego|m[aá]s tarde)|add (later|content)|agregar (despu[eé]s|luego)",
    ),
    ("sample_marker", r"^(ejemplo|example|sample|muestra)[:\s]"),
];

/// Boilerplate that says nothing about this particular business.
pub const GENERIC_PATTERNS: &[(&str, &str)] = &[
    (
        "boilerplate_greeting",
        r"^(hola|hello|hi|hey|buen[oa]s? (d[ií]as|tardes|noches))[!.,]*\s*(¿\s*)?((en )?qu[eé] (te|le|les) (puedo|podemos) ayudar|how (can|may) (i|we) help( you)?)?( hoy| today)?[?!.]*$",
    ),
    (
        "boilerplate_farewell",
        r"^(gracias|muchas gracias|thank you|thanks|adi[oó]s|hasta luego|hasta pronto|bye|goodbye|saludos|que tengas? un buen d[ií]a|have a (nice|good|great) day)[!.,]*\s*(por (tu|su) (mensaje|compra|preferencia|visita|contacto))?[!.]*$",
    ),
    (
        "company_boilerplate",
        r"^(somos|we are) (una?|la|el|a|an|the) (empresa|compa[ñn][ií]a|negocio|company|business)\b[^.]*[.!]?$",
    ),
    (
        "best_products_claim",
        r"(ofrecemos|brindamos|we offer|we provide) (los |las |the )?(mejores|best|excelentes?|great) (productos|servicios|products|services|soluciones|solutions)",
    ),
    (
        "best_quality_claim",
        r"(la mejor|el mejor|the best) (calidad|atenci[oó]n|servicio|quality|service)",
    ),
    (
        "here_to_help",
        r"(estamos|we are|we're) (para servirte|para servirle|here to help|aqu[ií] para ayudarte)",
    ),
    (
        "contact_for_info",
        r"(cont[aá]ctanos|cont[aá]ctenos|contact us) (para|for) (m[aá]s informaci[oó]n|more (info|information))",
    ),
    (
        "satisfaction_priority",
        r"(satisfacci[oó]n (del|de nuestros) clientes?|customer satisfaction) (es|is) (nuestra|our) (prioridad|priority)",
    ),
];

/// Markers of concrete information. Any hit exempts long text from the
/// meaningful-word check.
pub const SPECIFICITY_PATTERNS: &[(&str, &str)] = &[
    ("digit", r"[0-9]"),
    (
        "currency",
        r"[$€£]|\b(usd|mxn|eur|cop|ars|clp|pen|pesos?|d[oó]lares?|euros?)\b",
    ),
    (
        "day_name",
        r"\b(lunes|martes|mi[eé]rcoles|jueves|viernes|s[aá]bados?|domingos?|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    ),
    ("email", r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}"),
    ("phone_prefix", r"\+\s?[0-9]"),
    ("url", r"https?://|www\."),
];

/// Words that signal the author avoided being specific.
pub const VAGUE_WORDS: &[&str] = &[
    "etc",
    "etcetera",
    "etcétera",
    "varios",
    "varias",
    "diversos",
    "diversas",
    "depende",
    "algunos",
    "algunas",
    "cosas",
    "general",
    "generalmente",
    "normalmente",
    "aproximadamente",
    "whatever",
    "various",
    "several",
    "stuff",
    "things",
    "depends",
    "misc",
    "usually",
];

/// Multi-word vague phrases, matched as substrings.
pub const VAGUE_PHRASES: &[&str] = &[
    "entre otros",
    "entre otras",
    "y más",
    "y mas",
    "lo que sea",
    "and more",
    "and so on",
    "among others",
];

/// Keyboard-row fragments typed when someone just wants the field filled.
pub const KEYBOARD_ROWS: &[&str] = &[
    "qwer", "asdf", "zxcv", "hjkl", "uiop", "wasd", "poiu", "lkjh", "mnbv",
];

/// Vowels used by the keyboard-randomness heuristic.
pub const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú', 'ü'];

/// Common words ignored when counting meaningful words.
pub const STOPWORDS: &[&str] = &[
    // Spanish
    "el", "la", "los", "las", "un", "una", "unos", "unas", "de", "del", "al", "y", "o", "u",
    "e", "en", "con", "por", "para", "sin", "sobre", "entre", "que", "qué", "como", "cómo",
    "cuando", "donde", "dónde", "es", "son", "ser", "estar", "está", "están", "fue", "era",
    "muy", "más", "mas", "menos", "también", "tambien", "pero", "si", "sí", "no", "ya",
    "este", "esta", "estos", "estas", "ese", "esa", "eso", "esto", "aquí", "aqui", "nuestro",
    "nuestra", "nuestros", "nuestras", "su", "sus", "tu", "tus", "mi", "mis", "le", "les",
    "lo", "se", "te", "me", "nos", "hola", "gracias", "todo", "todos", "toda", "todas",
    "cada", "bien", "siempre", "hoy", "somos", "tenemos", "ofrecemos", "nosotros", "usted",
    "ustedes", "puede", "pueden", "podemos", "hacer", "mejor", "mejores", "clientes",
    "cliente", "servicio", "servicios", "producto", "productos", "empresa", "calidad",
    // English
    "the", "a", "an", "and", "or", "of", "to", "in", "on", "for", "with", "by", "at", "from",
    "is", "are", "was", "be", "this", "that", "these", "those", "our", "your", "we", "you",
    "they", "it", "its", "their", "as", "not", "but", "if", "so", "very", "more", "also",
    "all", "any", "each", "here", "there", "hello", "thanks", "please", "can", "will",
    "best", "customers", "customer", "service", "services", "product", "products",
    "company", "quality",
];
