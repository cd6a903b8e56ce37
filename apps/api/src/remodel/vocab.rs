//! Curated vocabularies for the deterministic keyword fallback.
//!
//! Read-only process-wide tables; the extractor matches them case-insensitively
//! against section text, so entries carry their canonical display casing.

/// Technology terms: languages, frameworks, datastores, cloud/devops tooling,
/// frontend/mobile stacks, ML/AI. Canonical casing is what callers display.
pub const TECH_TERMS: &[&str] = &[
    // languages
    "Java",
    "Kotlin",
    "Python",
    "Golang",
    "Rust",
    "TypeScript",
    "JavaScript",
    "C++",
    "C#",
    "Swift",
    "Scala",
    "Ruby",
    "PHP",
    // backend frameworks
    "Spring Boot",
    "Spring",
    "JPA",
    "Hibernate",
    "Node.js",
    "Django",
    "FastAPI",
    "Flask",
    "Express",
    "NestJS",
    "Rails",
    // frontend / mobile
    "React",
    "Vue",
    "Next.js",
    "Angular",
    "Svelte",
    "Flutter",
    "React Native",
    "Android",
    "iOS",
    // datastores / messaging
    "MySQL",
    "PostgreSQL",
    "MariaDB",
    "Oracle",
    "MongoDB",
    "DynamoDB",
    "Redis",
    "Memcached",
    "Elasticsearch",
    "Kafka",
    "RabbitMQ",
    // interfaces
    "REST API",
    "GraphQL",
    "gRPC",
    "WebSocket",
    "OAuth2",
    // cloud / devops
    "AWS",
    "GCP",
    "Azure",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Ansible",
    "Jenkins",
    "GitHub Actions",
    "ArgoCD",
    "Helm",
    "Nginx",
    "Linux",
    "CI/CD",
    "MSA",
    // ML / AI
    "TensorFlow",
    "PyTorch",
    "scikit-learn",
    "LLM",
    "MLOps",
    // practices
    "TDD",
    "JUnit",
    "Git",
];

/// Role/position terms. Mostly Korean because the target postings are.
pub const ROLE_TERMS: &[&str] = &[
    "백엔드",
    "프론트엔드",
    "풀스택",
    "서버 개발",
    "데이터 엔지니어",
    "머신러닝 엔지니어",
    "DevOps",
    "SRE",
    "Backend",
    "Frontend",
    "Full Stack",
];

/// Fragments that mark a free token as technology-like in the secondary,
/// vocabulary-independent pass. Deliberately broad; the pass only ever assigns
/// low weights, so an occasional false positive is harmless.
pub const TECH_HINT_FRAGMENTS: &[&str] = &[
    "js", "sql", "db", "api", "ops", "aws", "gcp", "azure", "cloud", "docker", "kube", "git",
    "linux", "http", "grpc", "graphql", "kafka", "redis", "spring", "java", "kotlin", "python",
    "node", "react", "vue", "tensor", "torch", "elastic", "mongo", "serverless", "terraform",
    "클라우드", "프레임워크", "라이브러리", "인프라",
];
