//! Whole-file translations of realistic declaration files.

use flowgen_common::Options;
use flowgen_emitter::compile_definition_string;

fn compile(source: &str) -> String {
    compile_definition_string(source, &Options::default().with_quiet(true))
        .unwrap()
        .text
}

#[test]
fn test_library_declaration() {
    let source = r#"
import { EventEmitter } from 'events';

export interface ClientOptions {
  host: string;
  port?: number;
  readonly retries: number;
  onError?: (error: Error) => void;
}

export declare class Client extends EventEmitter {
  constructor(options: ClientOptions);
  connect(): Promise<void>;
  query<T = unknown>(sql: string, params?: Array<string | number>): Promise<T[]>;
  static defaults: Partial<ClientOptions>;
}

export declare function createClient(options: ClientOptions): Client;

export declare const VERSION: string;
"#;
    let out = compile(source);
    let expected = "import { EventEmitter } from 'events';

export interface ClientOptions {
  host: string,
  port?: number,
  +retries: number,
  onError?: (error: Error) => void
}

declare export class Client extends EventEmitter {
  constructor(options: ClientOptions): this;
  connect(): Promise<void>;
  query<T>(sql: string, params?: Array<string | number>): Promise<T[]>;
  static defaults: $Rest<ClientOptions, {...}>;
}

declare export function createClient(options: ClientOptions): Client;

declare export var VERSION: string;
";
    assert_eq!(out, expected);
}

#[test]
fn test_ambient_module_with_namespace() {
    let source = r#"
declare module 'config' {
  namespace Config {
    interface Settings { debug: boolean }
    function load(path: string): Settings;
  }
  export = Config;
}
"#;
    let out = compile(source);
    let expected = "declare module 'config' {
  declare var Config: {| load: typeof Config$load |};

  declare interface Config$Settings {
    debug: boolean
  }

  declare function Config$load(path: string): Config$Settings;

  declare module.exports: typeof Config;
}
";
    assert_eq!(out, expected);
}

#[test]
fn test_generic_defaults_and_variance() {
    let out = compile("export interface Box<in out T, U = string> { value: T; other: U }\nexport type B = Box;\n");
    assert!(out.contains("export interface Box<T, U = string> {"), "{out}");
}

#[test]
fn test_defaulted_reference_gets_empty_arguments() {
    let out = compile("export interface Opts<T = string> { value: T }\nexport type O = Opts;\n");
    assert!(out.contains("export type O = Opts<>;"), "{out}");
}

#[test]
fn test_script_globals() {
    let out = compile("declare var process: { env: { [key: string]: string | void } };\ndeclare function setTimeout(cb: () => void, ms?: number): number;\n");
    assert_eq!(
        out,
        "declare var process: { env: { [key: string]: string | void, ... }, ... };\n\ndeclare function setTimeout(cb: () => void, ms?: number): number;\n"
    );
}

#[test]
fn test_destructured_parameter() {
    let out = compile("declare function f({ a, b }: { a: string; b: number }): void;\ndeclare function g([x, y]): void;\n");
    assert!(out.contains("declare function f({ a: string, b: number, ... }): void;"), "{out}");
    assert!(out.contains("declare function g([any, any]): void;"), "{out}");
}

#[test]
fn test_type_predicate() {
    let out = compile("declare function isString(x: unknown): x is string;\n");
    assert_eq!(out, "declare function isString(x: mixed): boolean;\n");
}
